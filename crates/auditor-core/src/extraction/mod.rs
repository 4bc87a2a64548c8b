//! Archive extraction into the managed extraction root.

pub mod stream;
pub mod zip;

use std::path::Path;
use std::path::PathBuf;

use crate::AuditorConfig;
use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::types::ExtractionRoot;
use crate::types::RepoName;

/// A repository that has been unpacked under the extraction root.
#[derive(Debug, Clone)]
pub struct ExtractedRepository {
    /// Handle that identifies the repository in later scans.
    pub name: RepoName,

    /// Absolute path of `<root>/<name>`.
    pub path: PathBuf,

    /// Statistics for the extraction that produced it.
    pub report: ExtractionReport,
}

/// Unpacks uploaded archives under a configured root.
///
/// # Examples
///
/// ```no_run
/// use auditor_core::AuditorConfig;
/// use auditor_core::Extractor;
/// use auditor_core::types::RepoName;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = Extractor::new(&AuditorConfig::new("/srv/extracted"));
/// let repo = extractor.extract("upload.zip", &RepoName::new("demo")?)?;
/// println!("{} files in {}", repo.report.files_extracted, repo.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    extract_dir: PathBuf,
    config: ExtractionConfig,
}

impl Extractor {
    /// Creates an extractor from the pipeline configuration.
    #[must_use]
    pub fn new(config: &AuditorConfig) -> Self {
        Self {
            extract_dir: config.extract_dir.clone(),
            config: config.extraction.clone(),
        }
    }

    /// Returns the configured extraction root (as configured, not canonical).
    #[must_use]
    pub fn extract_dir(&self) -> &Path {
        &self.extract_dir
    }

    /// Returns the extraction policy.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts `archive_path` into `<root>/<name>`.
    ///
    /// The root is created if it does not exist yet. Files already present at
    /// the destination are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be created, the archive is
    /// unreadable or corrupt, an entry violates the extraction policy, or the
    /// destination is not writable.
    pub fn extract(&self, archive_path: impl AsRef<Path>, name: &RepoName) -> Result<ExtractedRepository> {
        let archive_path = archive_path.as_ref();
        let root = ExtractionRoot::ensure(&self.extract_dir)?;
        let path = root.repository_path(name);

        let report = zip::extract_zip(archive_path, &path, &self.config)?;

        tracing::info!(
            repository = %name,
            files = report.files_extracted,
            directories = report.directories_created,
            bytes = report.bytes_written,
            duration_ms = u64::try_from(report.duration.as_millis()).unwrap_or(u64::MAX),
            "repository extracted"
        );

        Ok(ExtractedRepository {
            name: name.clone(),
            path,
            report,
        })
    }
}
