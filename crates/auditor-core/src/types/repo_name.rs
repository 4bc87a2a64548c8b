//! Repository handle used as the destination folder name.

use crate::AuditError;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Longest accepted name, matching common filesystem component limits.
const MAX_NAME_LEN: usize = 255;

/// A single, plain path segment naming an extracted repository.
///
/// A `RepoName` never contains separators, NUL bytes, or the `.`/`..`
/// components, so joining it onto the extraction root always yields a direct
/// child of the root. It is the handle that links an upload to later scans.
///
/// # Examples
///
/// ```
/// use auditor_core::types::RepoName;
///
/// let name = RepoName::from_upload(Some("my-project.zip"));
/// assert_eq!(name.as_str(), "my-project");
///
/// assert!(RepoName::new("../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RepoName(String);

impl RepoName {
    /// Validates `name` as a repository name.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidRepositoryName`] if the name is empty,
    /// too long, `.` or `..`, or contains a path separator or NUL byte.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if let Some(reason) = rejection_reason(&name) {
            return Err(AuditError::InvalidRepositoryName { name, reason });
        }
        Ok(Self(name))
    }

    /// Derives a name from an uploaded file's original name.
    ///
    /// Any directory part is dropped and a trailing `.zip` extension is
    /// stripped. When no usable name remains a fresh generated name is
    /// returned instead.
    #[must_use]
    pub fn from_upload(filename: Option<&str>) -> Self {
        filename
            .map(|raw| {
                let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
                strip_zip_extension(base).to_string()
            })
            .and_then(|candidate| Self::new(candidate).ok())
            .unwrap_or_else(Self::generated)
    }

    /// Returns a unique `upload-<uuid>` name.
    #[must_use]
    pub fn generated() -> Self {
        Self(format!("upload-{}", uuid::Uuid::new_v4().simple()))
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn rejection_reason(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name is empty")
    } else if name.len() > MAX_NAME_LEN {
        Some("name is too long")
    } else if name == "." || name == ".." {
        Some("name is a relative path component")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.contains('\0') {
        Some("name contains a null byte")
    } else {
        None
    }
}

fn strip_zip_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(ext)) if !stem.is_empty() && ext.eq_ignore_ascii_case(".zip") => stem,
        _ => name,
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for RepoName {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
