use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Filesystem capability used by the creator.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Removes a file or a directory tree. Missing paths are not an error.
    fn remove(&self, path: &Path) -> Result<()>;

    /// Recursively copies the contents of `source` into `dest`, merging with
    /// whatever `dest` already holds.
    fn copy_dir(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(Error::IoError)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let metadata = match path.symlink_metadata() {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::IoError(e)),
        };
        if metadata.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn copy_dir(&self, source: &Path, dest: &Path) -> Result<()> {
        for entry in WalkDir::new(source).follow_links(!PRESERVES_SYMLINKS) {
            let entry = entry.map_err(|e| Error::CopyFailed {
                source_path: e
                    .path()
                    .unwrap_or(source)
                    .display()
                    .to_string(),
                e: e.to_string(),
            })?;
            let relative = entry.path().strip_prefix(source).map_err(|e| Error::CopyFailed {
                source_path: entry.path().display().to_string(),
                e: e.to_string(),
            })?;
            let target = dest.join(relative);

            copy_entry(entry.path(), &target, entry.file_type()).map_err(|e| {
                Error::CopyFailed {
                    source_path: entry.path().display().to_string(),
                    e: e.to_string(),
                }
            })?;
            log::trace!("Copied '{}' to '{}'", entry.path().display(), target.display());
        }
        Ok(())
    }
}

/// Symlinks are recreated on unix. Elsewhere they are followed and their
/// targets copied, since creating links there needs extra privileges.
const PRESERVES_SYMLINKS: bool = cfg!(unix);

fn copy_entry(
    source: &Path,
    target: &Path,
    file_type: std::fs::FileType,
) -> std::io::Result<()> {
    if file_type.is_dir() {
        return std::fs::create_dir_all(target);
    }
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    #[cfg(unix)]
    {
        if file_type.is_symlink() {
            return copy_symlink(source, target);
        }
    }
    std::fs::copy(source, target).map(|_| ())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> std::io::Result<()> {
    let link = std::fs::read_link(source)?;
    if target.symlink_metadata().is_ok() {
        std::fs::remove_file(target)?;
    }
    std::os::unix::fs::symlink(link, target)
}

/// Resolves `namespace` to a directory directly under `base`.
///
/// Only plain relative names are accepted: anything that would escape `base`
/// (absolute paths, `..`, drive prefixes) or resolve to `base` itself is
/// rejected.
pub fn resolve_namespace<P: AsRef<Path>>(base: P, namespace: &str) -> Result<PathBuf> {
    let invalid = || Error::InvalidNamespace { namespace: namespace.to_string() };
    let relative = Path::new(namespace);

    let mut has_normal = false;
    for component in relative.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid())
            }
        }
    }
    if !has_normal {
        return Err(invalid());
    }

    Ok(base.as_ref().join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_namespace_joins_plain_names() {
        let path = resolve_namespace("/work", "demo").unwrap();
        assert_eq!(path, PathBuf::from("/work/demo"));
    }

    #[test]
    fn resolve_namespace_accepts_nested_names() {
        let path = resolve_namespace("/work", "apps/demo").unwrap();
        assert_eq!(path, PathBuf::from("/work/apps/demo"));
    }

    #[test]
    fn resolve_namespace_rejects_escaping_names() {
        for name in ["", ".", "..", "../demo", "apps/../../demo", "/tmp/demo"] {
            assert!(
                matches!(resolve_namespace("/work", name), Err(Error::InvalidNamespace { .. })),
                "'{name}' should be rejected"
            );
        }
    }

    #[test]
    fn remove_ignores_missing_paths() {
        let tmp = TempDir::new().unwrap();
        assert!(LocalFileSystem.remove(&tmp.path().join("missing")).is_ok());
    }

    #[test]
    fn remove_handles_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        let dir = tmp.path().join("dir");
        fs::write(&file, "x").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/inner.txt"), "y").unwrap();

        LocalFileSystem.remove(&file).unwrap();
        LocalFileSystem.remove(&dir).unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn copy_dir_merges_into_parent_of_source() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("demo");
        let staging = target.join("__hydra");
        fs::create_dir_all(staging.join("src")).unwrap();
        fs::write(staging.join("package.json"), "{}").unwrap();
        fs::write(staging.join("src/index.js"), "console.log(1)").unwrap();

        LocalFileSystem.copy_dir(&staging, &target).unwrap();

        assert_eq!(fs::read_to_string(target.join("package.json")).unwrap(), "{}");
        assert_eq!(
            fs::read_to_string(target.join("src/index.js")).unwrap(),
            "console.log(1)"
        );
        assert!(staging.join("package.json").exists());
    }

    #[test]
    fn copy_dir_fails_for_missing_source() {
        let tmp = TempDir::new().unwrap();
        let result = LocalFileSystem.copy_dir(&tmp.path().join("nope"), &tmp.path().join("out"));
        assert!(matches!(result, Err(Error::CopyFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn copy_dir_recreates_symlinks() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        let dest = tmp.path().join("dest");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink("real.txt", source.join("link.txt")).unwrap();

        LocalFileSystem.copy_dir(&source, &dest).unwrap();

        assert_eq!(fs::read_link(dest.join("link.txt")).unwrap(), PathBuf::from("real.txt"));
        assert_eq!(fs::read_to_string(dest.join("link.txt")).unwrap(), "data");
    }

    #[cfg(unix)]
    #[test]
    fn copy_dir_recreates_directory_symlinks() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        let dest = tmp.path().join("dest");
        fs::create_dir_all(source.join("lib")).unwrap();
        fs::write(source.join("lib/index.js"), "module.exports = 1;").unwrap();
        std::os::unix::fs::symlink("lib", source.join("current")).unwrap();

        LocalFileSystem.copy_dir(&source, &dest).unwrap();

        assert!(fs::symlink_metadata(dest.join("current")).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(dest.join("current/index.js")).unwrap(),
            "module.exports = 1;"
        );
    }
}
