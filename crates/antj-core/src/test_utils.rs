//! Test utilities for building zip fixtures in memory.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Timestamp given to entries unless overridden: 2015-06-15 10:30:00.
#[must_use]
pub fn fixture_time() -> DateTime {
    DateTime::from_date_and_time(2015, 6, 15, 10, 30, 0).unwrap()
}

/// Creates an in-memory zip archive of stored text files.
///
/// # Examples
///
/// ```
/// use antj_core::test_utils::create_test_zip;
///
/// let zip = create_test_zip(&[(".antj/build.xml", "<project/>"), ("src/a.txt", "a")]);
/// assert!(!zip.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (name, text)| {
            builder.add_file(name, text.as_bytes())
        })
        .build()
}

/// Builder for zip fixtures with directories, compression methods and
/// timestamps.
///
/// # Examples
///
/// ```
/// use antj_core::test_utils::ZipTestBuilder;
///
/// let zip = ZipTestBuilder::new()
///     .add_directory(".antj/")
///     .add_deflated_file(".antj/build.xml", b"<project default=\"all\"/>")
///     .build();
/// ```
pub struct ZipTestBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    time: DateTime,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            time: fixture_time(),
        }
    }

    /// Sets the timestamp of entries added after this call.
    #[must_use]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = time;
        self
    }

    fn options(&self, method: CompressionMethod) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(self.time)
            .unix_permissions(0o644)
    }

    /// Adds a stored file.
    #[must_use]
    pub fn add_file(mut self, name: &str, data: &[u8]) -> Self {
        let options = self.options(CompressionMethod::Stored);
        self.writer.start_file(name, options).unwrap();
        self.writer.write_all(data).unwrap();
        self
    }

    /// Adds a deflated file.
    #[must_use]
    pub fn add_deflated_file(mut self, name: &str, data: &[u8]) -> Self {
        let options = self.options(CompressionMethod::Deflated);
        self.writer.start_file(name, options).unwrap();
        self.writer.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry. A trailing `/` is added if missing.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        let options = self.options(CompressionMethod::Stored).unix_permissions(0o755);
        self.writer.add_directory(name, options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
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
    use zip::ZipArchive;

    #[test]
    fn test_builder_preserves_order_and_kinds() {
        let zip = ZipTestBuilder::new()
            .add_directory("d")
            .add_file("d/f.txt", b"f")
            .add_deflated_file("g.txt", b"ggggggggggggggggggg")
            .build();

        let mut archive = ZipArchive::new(Cursor::new(zip)).unwrap();
        assert_eq!(archive.len(), 3);
        assert!(archive.by_index(0).unwrap().is_dir());
        assert_eq!(archive.by_index(1).unwrap().name(), "d/f.txt");
        assert_eq!(
            archive.by_index(2).unwrap().compression(),
            CompressionMethod::Deflated
        );
    }

    #[test]
    fn test_entries_carry_fixture_time() {
        let zip = create_test_zip(&[("a.txt", "a")]);
        let mut archive = ZipArchive::new(Cursor::new(zip)).unwrap();
        let time = archive.by_index(0).unwrap().last_modified().unwrap();
        assert_eq!(time.year(), 2015);
        assert_eq!(time.minute(), 30);
    }
}
