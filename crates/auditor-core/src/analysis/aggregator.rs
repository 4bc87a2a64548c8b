//! Static analysis over extracted repositories.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::AuditError;
use crate::AuditorConfig;
use crate::Result;
use crate::types::ExtractionRoot;
use crate::types::RepoName;
use crate::walker::DirectoryWalker;

use super::estimator::IssueEstimator;
use super::estimator::RandomIssueEstimator;

/// What a scan walks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanTarget {
    /// Every repository under the extraction root.
    #[default]
    ExtractionRoot,

    /// A single repository previously returned by the extractor.
    Repository(RepoName),
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtractionRoot => f.write_str("<extraction root>"),
            Self::Repository(name) => write!(f, "{name}"),
        }
    }
}

/// Result of one static analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Non-directory entries found under the target.
    pub files_scanned: usize,

    /// Issue count reported by the estimator.
    pub issues_detected: u32,
}

/// Walks a scan target and packages the counts.
///
/// # Examples
///
/// ```no_run
/// use auditor_core::AuditorConfig;
/// use auditor_core::ScanAggregator;
/// use auditor_core::ScanTarget;
///
/// # fn main() -> auditor_core::Result<()> {
/// let aggregator = ScanAggregator::new(&AuditorConfig::default());
/// let result = aggregator.run_static_analysis(&ScanTarget::ExtractionRoot)?;
/// println!("{} files, {} issues", result.files_scanned, result.issues_detected);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ScanAggregator {
    extract_dir: PathBuf,
    walker: DirectoryWalker,
    estimator: Arc<dyn IssueEstimator>,
}

impl fmt::Debug for ScanAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanAggregator")
            .field("extract_dir", &self.extract_dir)
            .field("walker", &self.walker)
            .field("estimator", &self.estimator.name())
            .finish()
    }
}

impl ScanAggregator {
    /// Creates an aggregator using [`RandomIssueEstimator`].
    #[must_use]
    pub fn new(config: &AuditorConfig) -> Self {
        Self {
            extract_dir: config.extract_dir.clone(),
            walker: DirectoryWalker::new(config.walk.clone()),
            estimator: Arc::new(RandomIssueEstimator),
        }
    }

    /// Replaces the issue estimator.
    #[must_use]
    pub fn with_estimator(mut self, estimator: impl IssueEstimator + 'static) -> Self {
        self.estimator = Arc::new(estimator);
        self
    }

    /// Walks `target` and returns the file count with an issue estimate.
    ///
    /// The extraction root is created when missing, so scanning before any
    /// upload reports zero files.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryNotFound` when the repository is not a directory
    /// under the root, or any error of [`DirectoryWalker::walk`].
    pub fn run_static_analysis(&self, target: &ScanTarget) -> Result<ScanResult> {
        let start = Instant::now();
        let root = ExtractionRoot::ensure(&self.extract_dir)?;

        let path = match target {
            ScanTarget::ExtractionRoot => root.into_path_buf(),
            ScanTarget::Repository(name) => {
                let path = root.repository_path(name);
                if !path.is_dir() {
                    return Err(AuditError::RepositoryNotFound {
                        name: name.to_string(),
                    });
                }
                path
            }
        };

        let summary = self.walker.walk(&path)?;
        let result = ScanResult {
            files_scanned: summary.files,
            issues_detected: self.estimator.estimate(&summary),
        };

        tracing::info!(
            scan_target = %target,
            files = result.files_scanned,
            issues = result.issues_detected,
            estimator = self.estimator.name(),
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "static analysis complete"
        );

        Ok(result)
    }
}
