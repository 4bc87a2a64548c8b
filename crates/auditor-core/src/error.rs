//! Error types for repository ingestion and scanning.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `AuditError`.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Represents a specific extraction quota that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaResource {
    /// File count quota exceeded.
    FileCount {
        /// Current file count.
        current: usize,
        /// Maximum allowed file count.
        max: usize,
    },
    /// Total size quota exceeded.
    TotalSize {
        /// Current total size in bytes.
        current: u64,
        /// Maximum allowed total size in bytes.
        max: u64,
    },
    /// Single file size quota exceeded.
    FileSize {
        /// File size in bytes.
        size: u64,
        /// Maximum allowed file size in bytes.
        max: u64,
    },
    /// Integer overflow detected in quota tracking.
    IntegerOverflow,
}

impl std::fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileCount { current, max } => {
                write!(f, "quota exceeded: file count ({current} > {max})")
            }
            Self::TotalSize { current, max } => {
                write!(f, "quota exceeded: total size ({current} > {max})")
            }
            Self::FileSize { size, max } => {
                write!(f, "quota exceeded: single file size ({size} > {max})")
            }
            Self::IntegerOverflow => {
                write!(f, "quota exceeded: integer overflow in quota tracking")
            }
        }
    }
}

/// The walk budget that was exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkLimit {
    /// Directory nesting went deeper than allowed.
    Depth {
        /// Depth of the offending entry.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },
    /// More entries were visited than allowed.
    Entries {
        /// Entries visited so far.
        visited: usize,
        /// Maximum allowed entries.
        max: usize,
    },
}

impl std::fmt::Display for WalkLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Depth { depth, max } => {
                write!(f, "walk depth limit reached ({depth} > {max})")
            }
            Self::Entries { visited, max } => {
                write!(f, "walk entry limit reached ({visited} > {max})")
            }
        }
    }
}

/// Errors produced by the ingestion and scan pipeline.
#[derive(Error, Debug)]
pub enum AuditError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted, truncated, or not a zip file.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Archive entry tried to escape the extraction directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The entry path as stored in the archive.
        path: PathBuf,
    },

    /// Extraction quota exceeded.
    #[error("{resource}")]
    QuotaExceeded {
        /// Description of the exceeded resource.
        resource: QuotaResource,
    },

    /// Destination name is not a single plain path segment.
    #[error("invalid repository name {name:?}: {reason}")]
    InvalidRepositoryName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Requested repository has not been extracted.
    #[error("repository not found: {name}")]
    RepositoryNotFound {
        /// Repository name.
        name: String,
    },

    /// Walk root is missing or is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A followed symbolic link points back at one of its ancestors.
    #[error("symlink loop detected at {path}")]
    SymlinkLoop {
        /// The link that closes the cycle.
        path: PathBuf,
    },

    /// The directory walk exceeded its depth or entry budget.
    #[error("{limit}")]
    WalkBudgetExceeded {
        /// Which budget was exhausted.
        limit: WalkLimit,
    },

    /// The refactor suggestion collaborator failed.
    #[error("refactor advisor failed: {0}")]
    Advisor(String),
}

impl AuditError {
    /// Returns `true` if this error was raised by a containment or quota
    /// check rather than by the filesystem.
    ///
    /// # Examples
    ///
    /// ```
    /// use auditor_core::AuditError;
    /// use std::path::PathBuf;
    ///
    /// let err = AuditError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = AuditError::InvalidArchive("bad header".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. }
                | Self::QuotaExceeded { .. }
                | Self::SymlinkLoop { .. }
                | Self::WalkBudgetExceeded { .. }
        )
    }

    /// Returns `true` if the caller supplied an unusable request rather than
    /// the pipeline failing.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRepositoryName { .. } | Self::RepositoryNotFound { .. }
        )
    }

    /// Returns a short machine-readable code for logs and JSON output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidArchive(_) => "invalid_archive",
            Self::PathTraversal { .. } => "path_traversal",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::InvalidRepositoryName { .. } => "invalid_repository_name",
            Self::RepositoryNotFound { .. } => "repository_not_found",
            Self::NotADirectory { .. } => "not_a_directory",
            Self::SymlinkLoop { .. } => "symlink_loop",
            Self::WalkBudgetExceeded { .. } => "walk_budget_exceeded",
            Self::Advisor(_) => "advisor",
        }
    }

    /// Returns the quota resource that was exceeded, if applicable.
    #[must_use]
    pub const fn quota_resource(&self) -> Option<&QuotaResource> {
        match self {
            Self::QuotaExceeded { resource } => Some(resource),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for AuditError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
