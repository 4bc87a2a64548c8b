//! Extraction quota tracking.

use crate::AuditError;
use crate::ExtractionConfig;
use crate::Result;
use crate::error::QuotaResource;

/// Tracks resource usage while one archive is extracted.
#[derive(Debug, Default)]
pub struct QuotaTracker {
    files_extracted: usize,
    bytes_written: u64,
}

impl QuotaTracker {
    /// Creates a new quota tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a file of `declared_size` bytes against the quotas before it is
    /// written, and reserves one file slot.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` if the file count, the single file size, or
    /// the projected total size would exceed the configured limits.
    pub fn admit_file(&mut self, declared_size: u64, config: &ExtractionConfig) -> Result<()> {
        let files = self.files_extracted + 1;
        if files > config.max_file_count {
            return Err(AuditError::QuotaExceeded {
                resource: QuotaResource::FileCount {
                    current: files,
                    max: config.max_file_count,
                },
            });
        }

        if declared_size > config.max_file_size {
            return Err(AuditError::QuotaExceeded {
                resource: QuotaResource::FileSize {
                    size: declared_size,
                    max: config.max_file_size,
                },
            });
        }

        let projected = self.checked_total(declared_size)?;
        if projected > config.max_total_size {
            return Err(AuditError::QuotaExceeded {
                resource: QuotaResource::TotalSize {
                    current: projected,
                    max: config.max_total_size,
                },
            });
        }

        self.files_extracted = files;
        Ok(())
    }

    /// Records bytes actually written for an admitted file.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` if the running total overflows or exceeds
    /// `max_total_size`.
    pub fn record_bytes(&mut self, written: u64, config: &ExtractionConfig) -> Result<()> {
        let total = self.checked_total(written)?;
        if total > config.max_total_size {
            return Err(AuditError::QuotaExceeded {
                resource: QuotaResource::TotalSize {
                    current: total,
                    max: config.max_total_size,
                },
            });
        }
        self.bytes_written = total;
        Ok(())
    }

    /// Bytes still available under the total size quota.
    #[must_use]
    pub fn remaining_bytes(&self, config: &ExtractionConfig) -> u64 {
        config.max_total_size.saturating_sub(self.bytes_written)
    }

    /// Returns the number of files admitted so far.
    #[must_use]
    pub fn files_extracted(&self) -> usize {
        self.files_extracted
    }

    /// Returns the total bytes written.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn checked_total(&self, add: u64) -> Result<u64> {
        self.bytes_written
            .checked_add(add)
            .ok_or(AuditError::QuotaExceeded {
                resource: QuotaResource::IntegerOverflow,
            })
    }
}
