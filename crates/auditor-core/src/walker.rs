//! Bounded directory tree walking.

use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use walkdir::WalkDir;

use crate::AuditError;
use crate::Result;
use crate::WalkConfig;
use crate::error::WalkLimit;

/// Totals gathered by one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    /// Non-directory entries visited.
    pub files: usize,

    /// Directories descended into, excluding the root.
    pub directories: usize,

    /// Sum of file sizes in bytes.
    pub bytes: u64,
}

/// Walks a directory tree iteratively within a [`WalkConfig`] budget.
///
/// Symbolic links are followed by default, so a link to a directory is
/// descended and a link to a file is counted as a file. The root itself is
/// never counted.
///
/// # Examples
///
/// ```no_run
/// use auditor_core::WalkConfig;
/// use auditor_core::walker::DirectoryWalker;
///
/// # fn main() -> auditor_core::Result<()> {
/// let files = DirectoryWalker::new(WalkConfig::default()).count_files("./extracted")?;
/// println!("{files} files");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectoryWalker {
    config: WalkConfig,
}

impl DirectoryWalker {
    /// Creates a walker with the given budget.
    #[must_use]
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Returns the walk budget.
    #[must_use]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Counts the non-directory entries under `root`.
    ///
    /// # Errors
    ///
    /// See [`DirectoryWalker::walk`].
    pub fn count_files(&self, root: impl AsRef<Path>) -> Result<usize> {
        self.walk(root).map(|summary| summary.files)
    }

    /// Visits every entry under `root` and returns the totals.
    ///
    /// # Errors
    ///
    /// - `NotADirectory` if `root` is missing or not a directory
    /// - `SymlinkLoop` if a followed link points back at an ancestor
    /// - `WalkBudgetExceeded` if the depth or entry budget is exhausted
    /// - `Io` for unreadable entries and dangling links
    pub fn walk(&self, root: impl AsRef<Path>) -> Result<WalkSummary> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(AuditError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .min_depth(1)
            .max_depth(self.config.max_depth.saturating_add(1));

        let mut summary = WalkSummary::default();
        let mut visited: usize = 0;

        for entry in walker {
            let entry = entry.map_err(walk_error)?;

            if entry.depth() > self.config.max_depth {
                return Err(AuditError::WalkBudgetExceeded {
                    limit: WalkLimit::Depth {
                        depth: entry.depth(),
                        max: self.config.max_depth,
                    },
                });
            }

            visited += 1;
            if visited > self.config.max_entries {
                return Err(AuditError::WalkBudgetExceeded {
                    limit: WalkLimit::Entries {
                        visited,
                        max: self.config.max_entries,
                    },
                });
            }

            if entry.file_type().is_dir() {
                summary.directories += 1;
            } else {
                summary.files += 1;
                let metadata = entry.metadata().map_err(walk_error)?;
                summary.bytes = summary.bytes.saturating_add(metadata.len());
            }
        }

        tracing::debug!(
            root = %root.display(),
            files = summary.files,
            directories = summary.directories,
            bytes = summary.bytes,
            "walk complete"
        );

        Ok(summary)
    }
}

fn walk_error(err: walkdir::Error) -> AuditError {
    if err.loop_ancestor().is_some() {
        let path = err.path().map_or_else(PathBuf::new, Path::to_path_buf);
        return AuditError::SymlinkLoop { path };
    }

    let context = err.path().map(|p| p.display().to_string());
    match err.into_io_error() {
        Some(io) => match context {
            Some(path) => AuditError::Io(std::io::Error::new(io.kind(), format!("{path}: {io}"))),
            None => AuditError::Io(io),
        },
        None => AuditError::Io(std::io::Error::other("directory walk failed")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "aaa").unwrap();
        fs::create_dir_all(temp.path().join("dir/sub")).unwrap();
        fs::write(temp.path().join("dir/b.txt"), "b").unwrap();
        fs::write(temp.path().join("dir/sub/c.txt"), "cc").unwrap();
        temp
    }

    #[test]
    fn test_count_files_excludes_directories_and_root() {
        let temp = tree();
        let walker = DirectoryWalker::default();
        assert_eq!(walker.count_files(temp.path()).unwrap(), 3);
    }

    #[test]
    fn test_walk_summary() {
        let temp = tree();
        let summary = DirectoryWalker::default().walk(temp.path()).unwrap();
        assert_eq!(
            summary,
            WalkSummary {
                files: 3,
                directories: 2,
                bytes: 6,
            }
        );
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert_eq!(DirectoryWalker::default().count_files(temp.path()).unwrap(), 0);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = DirectoryWalker::default().count_files(temp.path().join("nope"));
        assert!(matches!(result, Err(AuditError::NotADirectory { .. })));
    }

    #[test]
    fn test_root_is_file() {
        let temp = tree();
        let result = DirectoryWalker::default().count_files(temp.path().join("a.txt"));
        assert!(matches!(result, Err(AuditError::NotADirectory { .. })));
    }

    #[test]
    fn test_depth_budget() {
        let temp = tree();
        let walker = DirectoryWalker::new(WalkConfig::default().with_max_depth(2));
        let result = walker.count_files(temp.path());
        assert!(matches!(
            result,
            Err(AuditError::WalkBudgetExceeded {
                limit: WalkLimit::Depth { depth: 3, max: 2 }
            })
        ));
    }

    #[test]
    fn test_depth_budget_exact_fit() {
        let temp = tree();
        let walker = DirectoryWalker::new(WalkConfig::default().with_max_depth(3));
        assert_eq!(walker.count_files(temp.path()).unwrap(), 3);
    }

    #[test]
    fn test_entry_budget() {
        let temp = tree();
        let walker = DirectoryWalker::new(WalkConfig::default().with_max_entries(4));
        let result = walker.count_files(temp.path());
        assert!(matches!(
            result,
            Err(AuditError::WalkBudgetExceeded {
                limit: WalkLimit::Entries { visited: 5, max: 4 }
            })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_followed() {
        let temp = tree();
        std::os::unix::fs::symlink(temp.path().join("dir"), temp.path().join("link")).unwrap();
        // dir/b.txt and dir/sub/c.txt are reachable twice.
        assert_eq!(DirectoryWalker::default().count_files(temp.path()).unwrap(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_not_followed_counts_as_file() {
        let temp = tree();
        std::os::unix::fs::symlink(temp.path().join("dir"), temp.path().join("link")).unwrap();
        let walker = DirectoryWalker::new(WalkConfig::default().with_follow_symlinks(false));
        assert_eq!(walker.count_files(temp.path()).unwrap(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop() {
        let temp = tree();
        std::os::unix::fs::symlink(temp.path(), temp.path().join("dir/sub/back")).unwrap();
        let result = DirectoryWalker::default().count_files(temp.path());
        assert!(matches!(result, Err(AuditError::SymlinkLoop { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_fails() {
        let temp = tree();
        std::os::unix::fs::symlink(temp.path().join("missing"), temp.path().join("dangling"))
            .unwrap();
        let result = DirectoryWalker::default().count_files(temp.path());
        assert!(matches!(result, Err(AuditError::Io(_))));
    }
}
