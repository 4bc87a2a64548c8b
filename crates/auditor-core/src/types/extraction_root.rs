//! The managed directory that holds every extracted repository.

use crate::AuditError;
use crate::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use super::RepoName;

/// A canonical, existing extraction root.
///
/// Once constructed, an `ExtractionRoot` is an absolute path to a directory.
/// Repository destinations are derived from it with
/// [`ExtractionRoot::repository_path`], which only accepts validated
/// [`RepoName`] segments.
///
/// # Examples
///
/// ```no_run
/// use auditor_core::types::ExtractionRoot;
/// use auditor_core::types::RepoName;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = ExtractionRoot::ensure("/srv/extracted")?;
/// let name = RepoName::new("demo")?;
/// println!("{}", root.repository_path(&name).display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRoot(PathBuf);

impl ExtractionRoot {
    /// Opens the extraction root, creating it (and any missing parents) first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be created
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    pub fn ensure(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "creating extraction root");
            fs::create_dir_all(path)?;
        }
        Self::open(path)
    }

    /// Opens an existing extraction root without creating it.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::NotADirectory`] if the path is missing or is not
    /// a directory, or an I/O error if it cannot be canonicalized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(AuditError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let canonical = path.canonicalize().map_err(|e| {
            AuditError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", path.display(), e),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Returns the root as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `<root>/<name>`.
    #[inline]
    #[must_use]
    pub fn repository_path(&self, name: &RepoName) -> PathBuf {
        self.0.join(name.as_str())
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_creates_missing_root() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("a").join("b");

        let root = ExtractionRoot::ensure(&path).expect("root should be created");
        assert!(path.is_dir());
        assert!(root.as_path().is_absolute());
    }

    #[test]
    fn test_ensure_existing_root() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = ExtractionRoot::ensure(temp.path()).expect("should open");
        assert_eq!(root.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_open_missing_root() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = ExtractionRoot::open(temp.path().join("missing"));
        assert!(matches!(result, Err(AuditError::NotADirectory { .. })));
    }

    #[test]
    fn test_ensure_rejects_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let result = ExtractionRoot::ensure(&file);
        assert!(matches!(result, Err(AuditError::NotADirectory { .. })));
    }

    #[test]
    fn test_repository_path() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = ExtractionRoot::ensure(temp.path()).unwrap();
        let name = RepoName::new("project").unwrap();

        let path = root.repository_path(&name);
        assert!(path.starts_with(root.as_path()));
        assert!(path.ends_with("project"));
    }
}
