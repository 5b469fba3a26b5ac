//! Archive extraction.

pub mod timestamps;
pub mod zip;

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use ::zip::ZipArchive;

use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::messages::MessageCatalog;
use crate::types::DestDir;

pub use self::zip::ZipExtractor;

/// Extracts an opened zip archive into `dest`.
///
/// # Errors
///
/// Returns an error if an entry name is rejected, a directory cannot be
/// created, or any read or write fails.
pub fn extract_zip<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    dest: &DestDir,
    config: &ExtractionConfig,
    catalog: &MessageCatalog,
) -> Result<ExtractionReport> {
    ZipExtractor::new(dest, config, catalog).extract(archive)
}

/// Opens the zip archive at `archive_path` and extracts it into
/// `output_dir`, which must exist.
///
/// # Examples
///
/// ```no_run
/// use antj_core::ExtractionConfig;
/// use antj_core::Locale;
/// use antj_core::MessageCatalog;
/// use antj_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = MessageCatalog::load(&Locale::from_env())?;
/// let config = ExtractionConfig::default();
/// let report = extract_archive("project.zip", "/tmp/out", &config, &catalog)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or is not a zip
/// container, if `output_dir` is not a directory, or if extraction fails.
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
    catalog: &MessageCatalog,
) -> Result<ExtractionReport> {
    let file = File::open(archive_path.as_ref())?;
    let mut archive = ZipArchive::new(file)?;
    let dest = DestDir::new(output_dir.as_ref())?;
    extract_zip(&mut archive, &dest, config, catalog)
}
