#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Files making up the template used by the integration tests.
pub const TEMPLATE_FILES: &[(&str, &str)] = &[
    (
        "package.json",
        r#"{
  "name": "hello-world",
  "version": "1.0.0",
  "scripts": { "start": "node src/index.js", "dev": "node --watch src/index.js" },
  "dependencies": { "@hydra-js/core": "1.0.0" }
}
"#,
    ),
    ("README.md", "# Hello World\n"),
    ("src/index.js", "const hydra = require('@hydra-js/core');\nhydra.start();\n"),
    ("src/routes/home.js", "module.exports = () => 'home';\n"),
];

/// Writes `files` under `root`, creating parent directories as needed.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let target = root.join(path);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(target, content).unwrap();
    }
}

/// Creates a git repository at `root` holding `files` in a single commit.
pub fn init_template_repo(root: &Path, files: &[(&str, &str)]) -> PathBuf {
    write_tree(root, files);

    let repo = git2::Repository::init(root).unwrap();
    let mut index = repo.index().unwrap();
    index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature = git2::Signature::now("Hydra", "hydra@example.com").unwrap();
    repo.commit(Some("HEAD"), &signature, &signature, "Initial template", &tree, &[])
        .unwrap();

    root.to_path_buf()
}

/// Panics with a readable message when the two trees differ.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    let different = dir_diff::is_different(actual, expected).unwrap();
    assert!(
        !different,
        "'{}' does not match '{}'",
        actual.display(),
        expected.display()
    );
}
