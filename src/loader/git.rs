use crate::error::{Error, Result};
use crate::loader::{interface::RepositoryCloner, TemplateSource};
use std::path::Path;
use url::Url;

/// Clones template repositories with libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCloner;

impl GitCloner {
    pub fn new() -> Self {
        Self
    }

    /// Determines if a string represents a git repository URL.
    ///
    /// Supports:
    /// - HTTPS URLs: https://github.com/user/repo
    /// - Git URLs: git://github.com/user/repo
    /// - SSH URLs: git@github.com:user/repo
    /// - SSH URLs with explicit protocol: ssh://git@github.com/user/repo
    /// - File URLs: file:///srv/templates/repo
    pub fn is_git_url(s: &str) -> bool {
        if let Ok(url) = Url::parse(s) {
            return matches!(url.scheme(), "http" | "https" | "git" | "ssh" | "file");
        }

        // scp-like form: user@host:path
        if s.contains('@') && s.contains(':') && !s.contains("://") {
            if let (Some(at_pos), Some(colon_pos)) = (s.find('@'), s.rfind(':')) {
                if colon_pos > at_pos {
                    let user_part = &s[..at_pos];
                    let host_part = &s[at_pos + 1..colon_pos];
                    let path_part = &s[colon_pos + 1..];

                    return !user_part.is_empty()
                        && !host_part.is_empty()
                        && !path_part.is_empty()
                        && (host_part.contains('.')
                            || host_part == "github.com"
                            || host_part == "gitlab.com"
                            || host_part == "bitbucket.org")
                        && path_part.contains('/');
                }
            }
        }

        false
    }

    fn fetch_options<'cb>() -> git2::FetchOptions<'cb> {
        let mut attempts = CredentialAttempts::default();
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            attempts.next(username_from_url, allowed_types)
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);
        fetch_opts
    }
}

/// Hands out credentials once per clone.
///
/// libgit2 calls the credentials callback again whenever the server rejects
/// what it got, so a second call means the first answer was refused.
#[derive(Debug, Default)]
struct CredentialAttempts {
    tried: bool,
}

impl CredentialAttempts {
    fn next(
        &mut self,
        username_from_url: Option<&str>,
        allowed_types: git2::CredentialType,
    ) -> std::result::Result<git2::Cred, git2::Error> {
        if self.tried {
            return Err(git2::Error::from_str("authentication failed: credentials were rejected"));
        }
        self.tried = true;

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
        } else {
            git2::Cred::default()
        }
    }
}

impl RepositoryCloner for GitCloner {
    fn clone_repository(&self, url: &str, destination: &Path) -> Result<()> {
        let source = TemplateSource::from_string(url)?;
        log::debug!("Cloning {source} to '{}'", destination.display());

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(Self::fetch_options());

        builder.clone(&source.location(), destination).map(|_| ()).map_err(|e| {
            Error::CloneFailed { url: url.to_string(), reason: e.message().to_string() }
        })
    }
}
