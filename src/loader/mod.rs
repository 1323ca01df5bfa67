use crate::error::{Error, Result};
use std::path::PathBuf;

pub mod git;
pub mod interface;

pub use git::GitCloner;
pub use interface::RepositoryCloner;

/// Where a template repository is fetched from.
#[derive(Debug, PartialEq)]
pub enum TemplateSource {
    /// Repository already present on the local filesystem
    FileSystem(PathBuf),
    /// Git repository URL (HTTPS or SSH)
    Git(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
        }
    }
}

impl TemplateSource {
    /// Classifies a template location.
    ///
    /// # Errors
    /// * `Error::CloneFailed` if `s` is neither a git URL nor an existing path
    pub fn from_string(s: &str) -> Result<Self> {
        if GitCloner::is_git_url(s) {
            return Ok(TemplateSource::Git(s.to_string()));
        }

        let path = PathBuf::from(s);
        if path.exists() {
            Ok(TemplateSource::FileSystem(path))
        } else {
            Err(Error::CloneFailed {
                url: s.to_string(),
                reason: "not a git repository URL or an existing local path".to_string(),
            })
        }
    }

    /// Location string handed to the git client.
    pub fn location(&self) -> String {
        match self {
            TemplateSource::FileSystem(path) => path.display().to_string(),
            TemplateSource::Git(repo) => repo.clone(),
        }
    }
}
