//! Repository ingestion and static scan pipeline.
//!
//! `auditor-core` unpacks uploaded zip archives into a managed extraction
//! root and walks the result to produce scan counts:
//!
//! - [`Extractor`] writes every entry of an archive under
//!   `<extract_dir>/<name>`, rejecting entries that escape it and enforcing
//!   size and count quotas (see [`ExtractionConfig`]).
//! - [`walker::DirectoryWalker`] counts files with an explicit depth and entry
//!   budget, reporting symlink cycles instead of recursing forever.
//! - [`ScanAggregator`] combines the walk with an [`analysis::IssueEstimator`].
//! - [`advisor::RefactorAdvisor`] is the seam for refactor suggestions.
//!
//! # Examples
//!
//! ```no_run
//! use auditor_core::AuditorConfig;
//! use auditor_core::ScanTarget;
//! use auditor_core::extract_archive;
//! use auditor_core::run_static_analysis;
//! use auditor_core::types::RepoName;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuditorConfig::new("./extracted");
//! let repo = extract_archive("upload.zip", &RepoName::from_upload(Some("upload.zip")), &config)?;
//! let scan = run_static_analysis(&ScanTarget::Repository(repo.name), &config)?;
//! println!("{} files, {} issues", scan.files_scanned, scan.issues_detected);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod advisor;
pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod report;
pub mod security;
pub mod types;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::PlaceholderAdvisor;
pub use advisor::RefactorAdvisor;
pub use analysis::ScanAggregator;
pub use analysis::ScanResult;
pub use analysis::ScanTarget;
pub use api::extract_archive;
pub use api::run_static_analysis;
pub use config::AuditorConfig;
pub use config::ExtractionConfig;
pub use config::WalkConfig;
pub use error::AuditError;
pub use error::Result;
pub use extraction::ExtractedRepository;
pub use extraction::Extractor;
pub use report::ExtractionReport;
pub use types::RepoName;
