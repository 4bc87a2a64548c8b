//! High-level entry points for one-shot extraction and scanning.

use std::path::Path;

use crate::AuditorConfig;
use crate::Result;
use crate::analysis::ScanAggregator;
use crate::analysis::ScanResult;
use crate::analysis::ScanTarget;
use crate::extraction::ExtractedRepository;
use crate::extraction::Extractor;
use crate::types::RepoName;

/// Extracts a zip archive into `<config.extract_dir>/<name>`.
///
/// # Errors
///
/// Returns an error if:
/// - The extraction root cannot be created
/// - The archive cannot be read or is not a valid zip file
/// - An entry violates the extraction policy
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use auditor_core::AuditorConfig;
/// use auditor_core::extract_archive;
/// use auditor_core::types::RepoName;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AuditorConfig::new("./extracted");
/// let repo = extract_archive("project.zip", &RepoName::new("project")?, &config)?;
/// println!("Extracted {} files", repo.report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>>(
    archive_path: P,
    name: &RepoName,
    config: &AuditorConfig,
) -> Result<ExtractedRepository> {
    Extractor::new(config).extract(archive_path, name)
}

/// Counts files under `target` and attaches an issue estimate.
///
/// # Errors
///
/// Returns an error if the target does not exist or the walk fails.
///
/// # Examples
///
/// ```no_run
/// use auditor_core::AuditorConfig;
/// use auditor_core::ScanTarget;
/// use auditor_core::run_static_analysis;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = run_static_analysis(&ScanTarget::ExtractionRoot, &AuditorConfig::default())?;
/// println!("{} files scanned", result.files_scanned);
/// # Ok(())
/// # }
/// ```
pub fn run_static_analysis(target: &ScanTarget, config: &AuditorConfig) -> Result<ScanResult> {
    ScanAggregator::new(config).run_static_analysis(target)
}
