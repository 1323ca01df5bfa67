//! Materializes a new project from the template repository.
//!
//! The template is cloned into a staging directory nested inside the target
//! (`<namespace>/__hydra`), copied up into the target, and the staging
//! directory is removed again whether or not the copy succeeded.

use crate::{
    config::Settings,
    constants::VCS_METADATA_DIR,
    error::{Error, Result},
    ioutils::{resolve_namespace, FileSystem},
    loader::RepositoryCloner,
};
use std::path::{Path, PathBuf};

/// Options accepted by `create`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Project directory name; the configured default is used when `None`.
    pub namespace: Option<String>,
    /// Replace an existing directory instead of failing.
    pub force: bool,
}

/// Paths involved in a single creation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLayout {
    pub namespace: String,
    pub target: PathBuf,
    pub staging: PathBuf,
}

impl ProjectLayout {
    pub fn resolve(cwd: &Path, namespace: &str, staging_dir: &str) -> Result<Self> {
        let target = resolve_namespace(cwd, namespace)?;
        let staging = target.join(staging_dir);
        Ok(Self { namespace: namespace.to_string(), target, staging })
    }
}

/// `create` command handler.
pub struct Creator<'a> {
    cloner: &'a dyn RepositoryCloner,
    fs: &'a dyn FileSystem,
    settings: &'a Settings,
}

impl<'a> Creator<'a> {
    pub fn new(
        cloner: &'a dyn RepositoryCloner,
        fs: &'a dyn FileSystem,
        settings: &'a Settings,
    ) -> Self {
        Self { cloner, fs, settings }
    }

    /// Creates the project under `cwd` and returns its layout.
    ///
    /// # Errors
    /// * `Error::InvalidNamespace` if the namespace escapes `cwd`
    /// * `Error::DirectoryExists` if the target exists and `force` is unset
    /// * `Error::CloneFailed`, `Error::TemplateMissing`, `Error::CopyFailed`
    ///   when materialization fails; the staging directory is removed first
    /// * `Error::CleanupFailed` if the staging directory survives a successful copy
    pub fn create(&self, cwd: &Path, options: &CreateOptions) -> Result<ProjectLayout> {
        let namespace =
            options.namespace.as_deref().unwrap_or(&self.settings.default_namespace);
        let layout = ProjectLayout::resolve(cwd, namespace, &self.settings.staging_dir)?;

        if self.fs.exists(&layout.target) {
            if !options.force {
                return Err(Error::DirectoryExists { namespace: layout.namespace });
            }
            log::info!("Directory {} already exists. Overwriting...", layout.namespace);
            self.fs.remove(&layout.target)?;
        }

        if let Err(err) = self.materialize(&layout) {
            if let Err(cleanup_err) = self.fs.remove(&layout.staging) {
                log::warn!(
                    "Failed to remove '{}' after an error: {cleanup_err}",
                    layout.staging.display()
                );
            }
            return Err(err);
        }

        log::info!("Cleaning up temporary files...");
        self.fs.remove(&layout.staging).map_err(|e| Error::CleanupFailed {
            staging_dir: layout.staging.display().to_string(),
            e: e.to_string(),
        })?;
        log::info!("Cleanup completed.");

        Ok(layout)
    }

    fn materialize(&self, layout: &ProjectLayout) -> Result<()> {
        self.fs.create_dir_all(&layout.target)?;

        log::info!("Cloning {} into '{}'", self.settings.template_url, layout.staging.display());
        self.cloner.clone_repository(&self.settings.template_url, &layout.staging)?;
        log::info!("Repository cloned successfully.");

        if !self.fs.exists(&layout.staging) {
            return Err(Error::TemplateMissing {
                staging_dir: layout.staging.display().to_string(),
            });
        }

        self.fs.remove(&layout.staging.join(VCS_METADATA_DIR))?;

        log::info!("Copying files to {}...", layout.namespace);
        self.fs.copy_dir(&layout.staging, &layout.target)?;
        log::info!("File structure created successfully.");
        Ok(())
    }
}
