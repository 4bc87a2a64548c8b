//! Pipeline configuration.
//!
//! Every component receives its configuration at construction time; there is
//! no process-wide state.

use std::path::Path;
use std::path::PathBuf;

/// Default extraction root, relative to the working directory.
pub const DEFAULT_EXTRACT_DIR: &str = "extracted";

/// Top-level configuration shared by the extractor and the scan aggregator.
///
/// # Examples
///
/// ```
/// use auditor_core::AuditorConfig;
/// use auditor_core::ExtractionConfig;
///
/// let config = AuditorConfig::new("/srv/repos").with_extraction(ExtractionConfig::permissive());
/// assert!(!config.extraction.contain_paths);
/// ```
#[derive(Debug, Clone)]
pub struct AuditorConfig {
    /// Root directory under which every uploaded repository is unpacked.
    pub extract_dir: PathBuf,

    /// Archive extraction policy.
    pub extraction: ExtractionConfig,

    /// Directory walk budget.
    pub walk: WalkConfig,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRACT_DIR)
    }
}

impl AuditorConfig {
    /// Creates a configuration rooted at `extract_dir` with default policies.
    #[must_use]
    pub fn new(extract_dir: impl Into<PathBuf>) -> Self {
        Self {
            extract_dir: extract_dir.into(),
            extraction: ExtractionConfig::default(),
            walk: WalkConfig::default(),
        }
    }

    /// Returns the extraction root.
    #[must_use]
    pub fn extract_dir(&self) -> &Path {
        &self.extract_dir
    }

    /// Replaces the extraction policy.
    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Replaces the walk budget.
    #[must_use]
    pub fn with_walk(mut self, walk: WalkConfig) -> Self {
        self.walk = walk;
        self
    }
}

/// Controls how archive entries are written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Reject entries whose names would resolve outside the destination.
    pub contain_paths: bool,

    /// Maximum number of components in an entry path.
    pub max_path_depth: usize,

    /// Maximum number of files written per archive.
    pub max_file_count: usize,

    /// Maximum size of a single extracted file in bytes.
    pub max_file_size: u64,

    /// Maximum total bytes written per archive.
    pub max_total_size: u64,
}

impl Default for ExtractionConfig {
    /// Contained extraction with generous quotas.
    ///
    /// Default values:
    /// - `contain_paths`: true
    /// - `max_path_depth`: 64
    /// - `max_file_count`: 10,000
    /// - `max_file_size`: 512 MiB
    /// - `max_total_size`: 2 GiB
    fn default() -> Self {
        Self {
            contain_paths: true,
            max_path_depth: 64,
            max_file_count: 10_000,
            max_file_size: 512 * 1024 * 1024,
            max_total_size: 2 * 1024 * 1024 * 1024,
        }
    }
}

impl ExtractionConfig {
    /// Unrestricted extraction: entry names are joined verbatim and no quota
    /// applies.
    ///
    /// Use only for archives from trusted sources.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            contain_paths: false,
            max_path_depth: usize::MAX,
            max_file_count: usize::MAX,
            max_file_size: u64::MAX,
            max_total_size: u64::MAX,
        }
    }

    /// Sets the per-archive file count quota.
    #[must_use]
    pub fn with_max_file_count(mut self, max: usize) -> Self {
        self.max_file_count = max;
        self
    }

    /// Sets the single-file size quota.
    #[must_use]
    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }

    /// Sets the total size quota.
    #[must_use]
    pub fn with_max_total_size(mut self, max: u64) -> Self {
        self.max_total_size = max;
        self
    }
}

/// Budget for a single directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    /// Descend into symbolic links to directories.
    pub follow_symlinks: bool,

    /// Deepest entry (relative to the walk root) the walk will visit.
    pub max_depth: usize,

    /// Maximum number of entries visited before the walk is aborted.
    pub max_entries: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            max_depth: 256,
            max_entries: 1_000_000,
        }
    }
}

impl WalkConfig {
    /// Sets the maximum depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum number of visited entries.
    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Enables or disables following symbolic links.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}
