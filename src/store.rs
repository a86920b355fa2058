//! Persistence of the version file and the changelog document

use crate::error::Result;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Storage for the two files a release rewrites
pub trait ReleaseStore {
    /// Raw text of the version file, `None` if it does not exist
    fn read_version(&self) -> Result<Option<String>>;

    fn write_version(&self, version: &str) -> Result<()>;

    /// Full changelog document, `None` if it does not exist
    fn read_changelog(&self) -> Result<Option<String>>;

    fn write_changelog(&self, document: &str) -> Result<()>;

    /// Paths to stage in the release commit
    fn tracked_paths(&self) -> Vec<PathBuf>;
}

/// Files on disk, replaced atomically on write
#[derive(Debug, Clone)]
pub struct FsReleaseStore {
    version_path: PathBuf,
    changelog_path: PathBuf,
}

impl FsReleaseStore {
    pub fn new(version_path: impl Into<PathBuf>, changelog_path: impl Into<PathBuf>) -> Self {
        FsReleaseStore {
            version_path: version_path.into(),
            changelog_path: changelog_path.into(),
        }
    }

    pub fn version_path(&self) -> &Path {
        &self.version_path
    }

    pub fn changelog_path(&self) -> &Path {
        &self.changelog_path
    }
}

impl ReleaseStore for FsReleaseStore {
    fn read_version(&self) -> Result<Option<String>> {
        read_optional(&self.version_path)
    }

    fn write_version(&self, version: &str) -> Result<()> {
        write_atomic(&self.version_path, version)
    }

    fn read_changelog(&self) -> Result<Option<String>> {
        read_optional(&self.changelog_path)
    }

    fn write_changelog(&self, document: &str) -> Result<()> {
        write_atomic(&self.changelog_path, document)
    }

    fn tracked_paths(&self) -> Vec<PathBuf> {
        vec![self.version_path.clone(), self.changelog_path.clone()]
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write through a temp file in the same directory, then rename over `path`
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FsReleaseStore {
        FsReleaseStore::new(dir.path().join("VERSION"), dir.path().join("CHANGELOG.md"))
    }

    #[test]
    fn test_missing_files_read_as_none() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.read_version().unwrap(), None);
        assert_eq!(store.read_changelog().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.write_version("1.2.3").unwrap();
        store.write_changelog("# Changelog\n\n## [1.2.3]").unwrap();

        assert_eq!(store.read_version().unwrap().as_deref(), Some("1.2.3"));
        assert_eq!(
            store.read_changelog().unwrap().as_deref(),
            Some("# Changelog\n\n## [1.2.3]")
        );
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.version_path(), "0.9.0-dev.3\n").unwrap();

        store.write_version("1.0.0").unwrap();

        assert_eq!(fs::read_to_string(store.version_path()).unwrap(), "1.0.0");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_tracked_paths() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(
            store.tracked_paths(),
            vec![dir.path().join("VERSION"), dir.path().join("CHANGELOG.md")]
        );
    }
}
