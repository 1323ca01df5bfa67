//! Fixed configuration shared by the `create` and `serve` handlers.

use crate::constants::{
    scripts, DEFAULT_NAMESPACE, MANIFEST_FILE, REQUIRED_DEPENDENCIES, STAGING_DIR,
    TEMPLATE_REPO_URL, UI_DEPENDENCIES,
};

/// Values the handlers read instead of touching constants directly, so a
/// caller can swap the template source or the required package set.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Repository cloned by `create`
    pub template_url: String,
    /// Name of the staging directory nested inside the target
    pub staging_dir: String,
    /// Namespace used when none is supplied
    pub default_namespace: String,
    /// Script run by `serve` without `--script`
    pub default_script: String,
    /// Script selected by `serve --dev`
    pub dev_script: String,
    /// Manifest file name looked up in the project root
    pub manifest_file: String,
    /// Packages the manifest must declare before anything is launched
    pub required_dependencies: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_url: TEMPLATE_REPO_URL.to_string(),
            staging_dir: STAGING_DIR.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            default_script: scripts::DEFAULT.to_string(),
            dev_script: scripts::DEV.to_string(),
            manifest_file: MANIFEST_FILE.to_string(),
            required_dependencies: REQUIRED_DEPENDENCIES
                .iter()
                .map(|dep| dep.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Points `create` at a different template repository.
    pub fn with_template_url<S: Into<String>>(mut self, url: S) -> Self {
        self.template_url = url.into();
        self
    }

    /// Extends the required package set with the UI-framework packages.
    pub fn with_ui_dependencies(mut self) -> Self {
        for dep in UI_DEPENDENCIES {
            if !self.required_dependencies.iter().any(|d| d == dep) {
                self.required_dependencies.push(dep.to_string());
            }
        }
        self
    }
}
