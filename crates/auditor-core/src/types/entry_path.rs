//! Archive entry path resolution.

use crate::AuditError;
use crate::ExtractionConfig;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// An archive entry name resolved against the extraction policy.
///
/// With `contain_paths` enabled the path is relative, normalized and free of
/// `..`, so [`EntryPath::join_onto`] always lands inside the destination.
/// With containment disabled the stored name is kept verbatim, including any
/// parent or absolute components.
///
/// # Examples
///
/// ```
/// use auditor_core::ExtractionConfig;
/// use auditor_core::types::EntryPath;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractionConfig::default();
/// let entry = EntryPath::resolve("./src/main.rs", &config)?;
/// assert_eq!(entry.as_path(), Path::new("src/main.rs"));
///
/// assert!(EntryPath::resolve("../etc/passwd", &config).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPath(PathBuf);

impl EntryPath {
    /// Resolves a raw entry name.
    ///
    /// # Validation Steps (when `contain_paths` is set)
    ///
    /// 1. Reject null bytes
    /// 2. Reject absolute paths and drive prefixes
    /// 3. Reject parent directory components (`..`)
    /// 4. Drop `.` components
    /// 5. Enforce `max_path_depth`
    ///
    /// # Errors
    ///
    /// - `AuditError::PathTraversal` for null bytes, `..`, or absolute paths
    /// - `AuditError::InvalidArchive` for excessive depth
    pub fn resolve(raw: &str, config: &ExtractionConfig) -> Result<Self> {
        let path = Path::new(raw);
        if !config.contain_paths {
            return Ok(Self(path.to_path_buf()));
        }

        if raw.contains('\0') {
            return Err(AuditError::PathTraversal {
                path: path.to_path_buf(),
            });
        }

        let mut depth = 0;
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    depth += 1;
                    normalized.push(part);
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(AuditError::PathTraversal {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        if depth > config.max_path_depth {
            return Err(AuditError::InvalidArchive(format!(
                "entry path depth {depth} exceeds maximum {}",
                config.max_path_depth
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns `true` if the entry resolves to the destination itself.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Returns the resolved path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins the entry onto a destination directory.
    #[inline]
    #[must_use]
    pub fn join_onto(&self, dest: &Path) -> PathBuf {
        dest.join(&self.0)
    }
}
