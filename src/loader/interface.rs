use crate::error::Result;
use std::path::Path;

/// Clone-capable version-control client.
pub trait RepositoryCloner {
    /// Clones the repository at `url` into `destination`.
    ///
    /// # Errors
    /// * `Error::CloneFailed` when the source cannot be fetched or checked out
    fn clone_repository(&self, url: &str, destination: &Path) -> Result<()>;
}
