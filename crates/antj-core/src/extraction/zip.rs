//! Zip extraction with timestamp restoration.

use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use filetime::FileTime;
use log::debug;
use log::info;
use log::warn;
use zip::CompressionMethod;
use zip::ZipArchive;

use super::timestamps::dos_to_filetime;
use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::messages::MessageCatalog;
use crate::messages::MessageKey;
use crate::types::DestDir;
use crate::types::SafePath;

/// Entry metadata read before the entry data.
#[derive(Debug)]
struct EntryMeta {
    name: String,
    is_dir: bool,
    deflated: bool,
    modified: Option<FileTime>,
}

/// Single-use extractor for one archive into one destination.
///
/// Directories created by the extractor, explicitly or as parents of deeper
/// entries, are remembered. Directory entries among them that carry a
/// timestamp get it applied again after the last entry is written, since
/// writing children moves a directory's mtime.
pub struct ZipExtractor<'a> {
    dest: &'a DestDir,
    config: &'a ExtractionConfig,
    catalog: &'a MessageCatalog,
    buffer: CopyBuffer,
    created: HashSet<PathBuf>,
    pending_times: Vec<(PathBuf, FileTime)>,
    report: ExtractionReport,
}

impl<'a> ZipExtractor<'a> {
    /// Creates an extractor writing under `dest`.
    #[must_use]
    pub fn new(
        dest: &'a DestDir,
        config: &'a ExtractionConfig,
        catalog: &'a MessageCatalog,
    ) -> Self {
        Self {
            dest,
            config,
            catalog,
            buffer: CopyBuffer::new(),
            created: HashSet::new(),
            pending_times: Vec::new(),
            report: ExtractionReport::new(),
        }
    }

    /// Extracts every entry in central directory order.
    ///
    /// # Errors
    ///
    /// The first failing entry aborts extraction; entries before it stay on
    /// disk.
    pub fn extract<R: Read + Seek>(
        mut self,
        archive: &mut ZipArchive<R>,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let meta = EntryMeta {
                name: entry.name().to_string(),
                is_dir: entry.is_dir(),
                deflated: entry.compression() == CompressionMethod::Deflated,
                modified: entry.last_modified().and_then(dos_to_filetime),
            };
            self.extract_entry(&meta, &mut entry)?;
        }

        for (path, time) in std::mem::take(&mut self.pending_times) {
            self.apply_mtime(&path, time);
        }

        self.report.duration = start.elapsed();
        Ok(self.report)
    }

    fn extract_entry(&mut self, entry: &EntryMeta, reader: &mut dyn Read) -> Result<()> {
        let safe = SafePath::from_entry_name(&entry.name, self.dest, self.config)?;

        if entry.is_dir && safe.is_root() {
            debug!("skipping root directory entry {:?}", entry.name);
            return Ok(());
        }

        let path = if entry.is_dir {
            self.extract_directory(entry, &safe)?
        } else {
            self.extract_file(entry, &safe, reader)?
        };

        if self.config.restore_timestamps
            && let Some(time) = entry.modified
        {
            self.apply_mtime(&path, time);
        }

        Ok(())
    }

    fn extract_directory(&mut self, entry: &EntryMeta, safe: &SafePath) -> Result<PathBuf> {
        let path = self.dest.join(safe);

        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(self.create_dir_error(&path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.create_dirs(&path)?,
            Err(e) => return Err(e.into()),
        }

        if self.config.restore_timestamps
            && self.created.contains(&path)
            && let Some(time) = entry.modified
        {
            self.pending_times.push((path.clone(), time));
        }

        info!("{}", self.catalog.format(MessageKey::Created, &entry.name));
        Ok(path)
    }

    fn extract_file(
        &mut self,
        entry: &EntryMeta,
        safe: &SafePath,
        reader: &mut dyn Read,
    ) -> Result<PathBuf> {
        if safe.is_root() {
            return Err(ExtractionError::SecurityViolation {
                reason: format!("file entry without a name: {:?}", entry.name),
            });
        }

        let path = self.dest.join(safe);
        if let Some(parent) = path.parent() {
            self.create_dirs(parent)?;
        }

        let mut file = File::create(&path).map_err(|e| {
            ExtractionError::Io(io::Error::new(
                e.kind(),
                format!("failed to create {}: {e}", path.display()),
            ))
        })?;
        let written = copy_with_buffer(reader, &mut file, &mut self.buffer)?;
        drop(file);

        self.report.files_extracted += 1;
        self.report.bytes_written += written;

        let key = if entry.deflated {
            MessageKey::Inflated
        } else {
            MessageKey::Extracted
        };
        info!("{}", self.catalog.format(key, &entry.name));
        Ok(path)
    }

    /// Creates `target` and any missing ancestors below the root, recording
    /// each directory created.
    fn create_dirs(&mut self, target: &Path) -> Result<()> {
        let mut missing = Vec::new();
        let mut current = target;

        while current != self.dest.as_path() {
            match fs::metadata(current) {
                Ok(metadata) if metadata.is_dir() => break,
                Ok(_) => return Err(self.create_dir_error(current)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    missing.push(current.to_path_buf());
                }
                Err(e) => return Err(e.into()),
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        for dir in missing.into_iter().rev() {
            if let Err(e) = fs::create_dir(&dir) {
                if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() {
                    continue;
                }
                debug!("create_dir {} failed: {e}", dir.display());
                return Err(self.create_dir_error(&dir));
            }
            self.report.directories_created += 1;
            self.created.insert(dir);
        }

        Ok(())
    }

    fn create_dir_error(&self, path: &Path) -> ExtractionError {
        ExtractionError::CreateDirectory {
            path: path.to_path_buf(),
            message: self
                .catalog
                .format(MessageKey::CreateDirFailed, path.display()),
        }
    }

    fn apply_mtime(&mut self, path: &Path, time: FileTime) {
        match filetime::set_file_mtime(path, time) {
            Ok(()) => self.report.timestamps_restored += 1,
            Err(e) => {
                let message = format!("cannot set modification time of {}: {e}", path.display());
                warn!("{message}");
                self.report.add_warning(message);
            }
        }
    }
}
