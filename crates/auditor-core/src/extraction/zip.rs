//! ZIP archive extraction.

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::AuditError;
use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::error::QuotaResource;
use crate::security::QuotaTracker;
use crate::types::EntryPath;

use super::stream::copy_bounded;

/// Unpacks every entry of the zip archive at `archive_path` into `dest`.
///
/// Existing files at an entry's location are truncated and rewritten; files
/// that the archive does not mention are left alone. Symbolic link entries
/// are written as regular files holding the link text.
///
/// There is no rollback: when an entry fails, the entries before it stay on
/// disk.
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be opened or is not a valid zip file
/// - An entry name escapes `dest` while containment is enabled
/// - A quota in `config` is exceeded
/// - Writing to `dest` fails
pub fn extract_zip(
    archive_path: &Path,
    dest: &Path,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

    tracing::debug!(
        archive = %archive_path.display(),
        entries = archive.len(),
        "opened zip archive"
    );

    fs::create_dir_all(dest)?;

    let mut report = ExtractionReport::new();
    let mut quota = QuotaTracker::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_owned();
        let entry_path = EntryPath::resolve(&name, config)?;

        if entry_path.is_empty() {
            report.add_warning(format!("skipped entry {name:?}: resolves to the destination"));
            continue;
        }

        let output_path = entry_path.join_onto(dest);

        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
            report.directories_created += 1;
            continue;
        }

        quota.admit_file(entry.size(), config)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let remaining = quota.remaining_bytes(config);
        let limit = config.max_file_size.min(remaining);

        let mut writer = BufWriter::with_capacity(64 * 1024, File::create(&output_path)?);
        let written = copy_bounded(&mut entry, &mut writer, limit).map_err(|err| match err {
            AuditError::QuotaExceeded {
                resource: QuotaResource::FileSize { size, .. },
            } if remaining < config.max_file_size => AuditError::QuotaExceeded {
                resource: QuotaResource::TotalSize {
                    current: quota.bytes_written().saturating_add(size),
                    max: config.max_total_size,
                },
            },
            other => other,
        })?;
        writer.flush()?;

        quota.record_bytes(written, config)?;
        report.files_extracted += 1;
    }

    report.bytes_written = quota.bytes_written();
    report.duration = start.elapsed();
    Ok(report)
}
