use crate::constants::exit_codes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Invalid namespace '{namespace}': it must be a directory name inside the current directory.")]
    InvalidNamespace { namespace: String },

    #[error("Directory {namespace} already exists. Use --force to overwrite.")]
    DirectoryExists { namespace: String },

    #[error("Failed to clone repository '{url}'. Original error: {reason}")]
    CloneFailed { url: String, reason: String },

    #[error("{staging_dir} does not exist in the repository.")]
    TemplateMissing { staging_dir: String },

    #[error("Cannot copy '{source_path}'. Original error: {e}")]
    CopyFailed { source_path: String, e: String },

    #[error("Failed to remove temporary directory '{staging_dir}'. Original error: {e}")]
    CleanupFailed { staging_dir: String, e: String },

    #[error("{manifest} not found. Are you in the Application root?")]
    NotAProject { manifest: String },

    #[error("Failed to parse {manifest}. Original error: {e}")]
    ManifestParseError { manifest: String, e: serde_json::Error },

    #[error("Script '{script}' not found in {manifest}")]
    ScriptNotFound { script: String, manifest: String },

    /// Every required package absent from the manifest, in declaration order.
    #[error("Missing essential dependencies: {}", .missing.join(", "))]
    MissingDependency { missing: Vec<String> },

    #[error("Failed to start {program}. Original error: {e}")]
    LaunchFailed { program: String, e: std::io::Error },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("Error: {err}");
    std::process::exit(exit_codes::FAILURE);
}
