//! Extraction and launch reporting.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Statistics about one archive extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of file entries written.
    pub files_extracted: usize,

    /// Number of directories created, explicit or implicit.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Number of timestamps applied, second pass included.
    pub timestamps_restored: usize,

    /// Duration of the extraction.
    pub duration: Duration,

    /// Problems that did not abort extraction.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns files plus directories.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns whether any warnings were recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Outcome of a successful launch.
#[derive(Debug, Clone)]
pub struct LaunchReport {
    /// Extraction statistics.
    pub extraction: ExtractionReport,

    /// Where the archive was extracted.
    pub extraction_root: PathBuf,

    /// Whether `extraction_root` still exists.
    pub kept: bool,

    /// The build command line that ran.
    pub command: Vec<OsString>,
}
