//! Constants used throughout the Hydra application

/// Repository every new app is generated from
pub const TEMPLATE_REPO_URL: &str = "https://github.com/hydra-js/hello-world.git";

/// Name of the transient clone directory inside the target directory
pub const STAGING_DIR: &str = "__hydra";

/// Directory name used when `create` is called without a namespace
pub const DEFAULT_NAMESPACE: &str = "my-hydra-app";

/// Version-control metadata stripped from the template before copying
pub const VCS_METADATA_DIR: &str = ".git";

/// Project manifest looked up by `serve`
pub const MANIFEST_FILE: &str = "package.json";

/// Script names
pub mod scripts {
    pub const DEFAULT: &str = "start";
    pub const DEV: &str = "dev";
}

/// Packages a Hydra app must declare in its manifest
pub const REQUIRED_DEPENDENCIES: &[&str] = &["@hydra-js/core"];

/// UI-framework packages required by the UI flavour of the app
pub const UI_DEPENDENCIES: &[&str] = &["react", "react-dom"];

/// Package-script runner
#[cfg(windows)]
pub const PACKAGE_RUNNER: &str = "npm.cmd";
#[cfg(not(windows))]
pub const PACKAGE_RUNNER: &str = "npm";

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    /// Offset added to a signal number when a child is killed by it
    pub const SIGNAL_BASE: i32 = 128;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
