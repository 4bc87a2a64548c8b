//! In-memory zip builders for tests.
//!
//! Available to this crate's unit tests and, through the `test-utils`
//! feature, to downstream test suites.
//!
//! # Panics
//!
//! Every function here panics on writer errors; they are meant for tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

fn stored_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644)
}

/// Creates an in-memory zip archive from `(path, text)` pairs.
///
/// Entries are stored uncompressed with mode 0o644.
///
/// # Examples
///
/// ```ignore
/// use auditor_core::test_utils::create_test_zip;
///
/// let data = create_test_zip(&[("a.txt", "a"), ("dir/b.txt", "b")]);
/// assert!(!data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (path, text)| {
            builder.add_file(path, text.as_bytes())
        })
        .build()
}

/// Builder for zip archives with explicit directory entries or binary data.
///
/// # Examples
///
/// ```ignore
/// use auditor_core::test_utils::ZipTestBuilder;
///
/// let data = ZipTestBuilder::new()
///     .add_directory("src/")
///     .add_file("src/main.rs", b"fn main() {}")
///     .build();
/// assert!(!data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        self.zip.start_file(path, stored_options()).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        self.zip
            .add_directory(path, SimpleFileOptions::default().unix_permissions(0o755))
            .unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_zip_lists_entries() {
        let data = create_test_zip(&[("a.txt", "a"), ("dir/b.txt", "bb")]);
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_builder_directory_entry() {
        let data = ZipTestBuilder::new().add_directory("d/").build();
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert!(archive.by_index(0).unwrap().is_dir());
    }
}
