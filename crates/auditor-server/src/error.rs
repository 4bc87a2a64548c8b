//! Error conversion utilities for CLI.
//!
//! Converts auditor-core's typed errors (thiserror) into contextual errors
//! (anyhow) with actionable guidance.

use anyhow::anyhow;
use auditor_core::AuditError;
use std::path::Path;

/// Converts `AuditError` into an anyhow error naming `subject`, the archive or
/// directory the command was working on.
pub fn convert_audit_error(err: AuditError, subject: &Path) -> anyhow::Error {
    match err {
        AuditError::PathTraversal { path } => anyhow!(
            "Security violation: Archive '{}' contains an entry escaping the destination: '{}'\n\
             HINT: This archive may be malicious. Use --permissive only for trusted archives.",
            subject.display(),
            path.display()
        ),
        AuditError::QuotaExceeded { resource } => anyhow!(
            "Extraction limit exceeded for '{}': {}\n\
             HINT: Use --max-files, --max-total-size, or --max-file-size to raise limits.",
            subject.display(),
            resource
        ),
        AuditError::InvalidArchive(reason) => anyhow!(
            "Invalid archive '{}': {}\n\
             HINT: The archive may be corrupted or not a zip file.",
            subject.display(),
            reason
        ),
        AuditError::NotADirectory { path } => anyhow!(
            "Not a directory: '{}'\n\
             HINT: Check --extract-dir or the EXTRACT_DIR environment variable.",
            path.display()
        ),
        AuditError::SymlinkLoop { path } => anyhow!(
            "Symlink loop under '{}' at '{}'\n\
             HINT: Remove the link that points back at its own ancestor.",
            subject.display(),
            path.display()
        ),
        AuditError::WalkBudgetExceeded { limit } => anyhow!(
            "Scan of '{}' stopped: {}\n\
             HINT: Use --max-depth or --max-entries to raise the walk budget.",
            subject.display(),
            limit
        ),
        AuditError::RepositoryNotFound { name } => anyhow!(
            "Repository '{}' not found under '{}'\n\
             HINT: Run `auditor extract` first, or omit --repository to scan everything.",
            name,
            subject.display()
        ),
        AuditError::InvalidRepositoryName { name, reason } => anyhow!(
            "Invalid repository name {name:?}: {reason}\n\
             HINT: Names must be a single path segment without '/', '\\', or NUL."
        ),
        AuditError::Io(io_err) => anyhow!(
            "I/O error while processing '{}': {}",
            subject.display(),
            io_err
        ),
        AuditError::Advisor(_) => {
            anyhow::Error::from(err).context(format!("Error scanning '{}'", subject.display()))
        }
    }
}

/// Adds context to a core result.
pub fn add_context<T>(result: Result<T, AuditError>, subject: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_audit_error(e, subject))
}
