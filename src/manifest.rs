use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// The parts of a project's `package.json` that `serve` looks at.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Manifest {
    /// Only shown in logs, so any JSON value is accepted.
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub version: Option<Value>,
    /// Script name to command line.
    #[serde(default)]
    pub scripts: Option<IndexMap<String, String>>,
    /// Package name to version constraint.
    #[serde(default)]
    pub dependencies: Option<IndexMap<String, String>>,
}

impl Manifest {
    /// Reads the manifest from `path`.
    ///
    /// # Errors
    /// * `Error::NotAProject` if the file does not exist
    /// * `Error::ManifestParseError` if it is not a valid manifest
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let manifest = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotAProject { manifest })
            }
            Err(e) => return Err(Error::IoError(e)),
        };

        Self::parse(&content, &manifest)
    }

    /// Parses manifest content; `manifest` names the source in errors.
    pub fn parse(content: &str, manifest: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::ManifestParseError { manifest: manifest.to_string(), e })
    }

    /// `name@version` for log output.
    pub fn describe(&self) -> String {
        let text = |value: &Option<Value>| match value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let name = text(&self.name);
        let version = text(&self.version);
        match (name.is_empty(), version.is_empty()) {
            (true, _) => "<unnamed>".to_string(),
            (false, true) => name,
            (false, false) => format!("{name}@{version}"),
        }
    }

    /// Command for `script`, if it is declared and non-empty.
    pub fn script(&self, script: &str) -> Option<&str> {
        self.scripts
            .as_ref()
            .and_then(|scripts| scripts.get(script))
            .map(String::as_str)
            .filter(|command| !command.is_empty())
    }

    /// Whether `name` is declared with a non-empty version constraint.
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies
            .as_ref()
            .and_then(|deps| deps.get(name))
            .is_some_and(|version| !version.is_empty())
    }

    /// Names from `required` the manifest does not declare, in `required` order.
    pub fn missing_dependencies<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.has_dependency(name))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "name": "demo",
        "version": "1.0.0",
        "scripts": { "start": "node x.js", "dev": "node --watch x.js", "empty": "" },
        "dependencies": { "@hydra-js/core": "1.0.0", "react": "" }
    }"#;

    #[test]
    fn parses_scripts_and_dependencies() {
        let manifest = Manifest::parse(MANIFEST, "package.json").unwrap();
        assert_eq!(manifest.describe(), "demo@1.0.0");
        assert_eq!(manifest.script("start"), Some("node x.js"));
        assert_eq!(manifest.script("dev"), Some("node --watch x.js"));
        assert_eq!(manifest.script("build"), None);
        assert!(manifest.has_dependency("@hydra-js/core"));
    }

    #[test]
    fn empty_entries_count_as_missing() {
        let manifest = Manifest::parse(MANIFEST, "package.json").unwrap();
        assert_eq!(manifest.script("empty"), None);
        assert!(!manifest.has_dependency("react"));
    }

    #[test]
    fn missing_dependencies_keep_required_order() {
        let manifest = Manifest::parse(MANIFEST, "package.json").unwrap();
        let missing =
            manifest.missing_dependencies(&["react-dom", "@hydra-js/core", "react", "vue"]);
        assert_eq!(missing, vec!["react-dom", "react", "vue"]);
    }

    #[test]
    fn absent_or_null_tables_are_empty() {
        let manifest = Manifest::parse(r#"{"scripts": null}"#, "package.json").unwrap();
        assert_eq!(manifest.script("start"), None);
        assert_eq!(manifest.missing_dependencies(&["@hydra-js/core"]), vec!["@hydra-js/core"]);
    }

    #[test]
    fn non_string_name_and_version_are_accepted() {
        let manifest = Manifest::parse(
            r#"{"name": "demo", "version": 1, "scripts": {"start": "node x.js"}}"#,
            "package.json",
        )
        .unwrap();
        assert_eq!(manifest.describe(), "demo@1");
        assert_eq!(manifest.script("start"), Some("node x.js"));
    }

    #[test]
    fn unnamed_manifest_is_described_as_such() {
        let manifest = Manifest::parse(r#"{"version": "2.0.0"}"#, "package.json").unwrap();
        assert_eq!(manifest.describe(), "<unnamed>");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = Manifest::parse("{ not json", "package.json");
        assert!(matches!(result, Err(Error::ManifestParseError { ref manifest, .. }) if manifest == "package.json"));
    }

    #[test]
    fn wrong_types_are_a_parse_error() {
        let result = Manifest::parse(r#"{"scripts": ["start"]}"#, "package.json");
        assert!(matches!(result, Err(Error::ManifestParseError { .. })));
    }

    #[test]
    fn load_reports_missing_file_as_not_a_project() {
        let tmp = TempDir::new().unwrap();
        let result = Manifest::load(tmp.path().join("package.json"));
        assert!(matches!(result, Err(Error::NotAProject { ref manifest }) if manifest == "package.json"));
    }

    #[test]
    fn load_reads_from_disk() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), MANIFEST).unwrap();
        let manifest = Manifest::load(tmp.path().join("package.json")).unwrap();
        assert_eq!(manifest.version, Some(Value::String("1.0.0".to_string())));
    }
}
