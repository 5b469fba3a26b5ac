//! Error conversion utilities for CLI.
//!
//! Converts antj-core's typed errors (thiserror) into contextual errors
//! (anyhow) with actionable guidance.

use anyhow::anyhow;
use antj_core::BuildError;
use antj_core::ExtractionError;
use antj_core::LaunchError;
use std::io;
use std::path::Path;

/// Converts `LaunchError` to a user-facing anyhow error with context.
pub fn convert_launch_error(err: LaunchError, archive: &Path) -> anyhow::Error {
    match err {
        LaunchError::Catalog(e) => {
            anyhow!(
                "Message catalog unavailable: {e}\n\
                 HINT: Unset ANTJ_MESSAGES or point it at a readable properties file."
            )
        }
        LaunchError::TempDir(e) => {
            anyhow!(
                "Cannot create temporary directory: {e}\n\
                 HINT: Check that TMPDIR exists and is writable."
            )
        }
        LaunchError::OpenArchive { path, source } => {
            anyhow!("Cannot open archive '{}': {source}", path.display())
        }
        LaunchError::Unsupported { container, reason } => {
            anyhow!(
                "Unsupported container '{}': {reason}\n\
                 HINT: Append a zip archive holding .antj/build.xml to the executable.",
                container.display()
            )
        }
        LaunchError::Extraction(e) => convert_extraction_error(e, archive),
        LaunchError::Build(e) => convert_build_error(e),
    }
}

/// Converts `ExtractionError` to a user-facing anyhow error with context.
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::PathTraversal { path } => {
            anyhow!(
                "Security violation: Archive '{}' attempted path traversal with '{}'\n\
                 HINT: This archive may be malicious. Do not run it.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::SecurityViolation { reason } => {
            anyhow!(
                "Security violation in '{}': {reason}",
                archive.display()
            )
        }
        ExtractionError::Zip(e) => {
            anyhow!(
                "Invalid archive '{}': {e}\n\
                 HINT: The file may be corrupted or may not be a zip archive.",
                archive.display()
            )
        }
        ExtractionError::CreateDirectory { message, .. } => anyhow!("{message}"),
        ExtractionError::Io(e) => {
            anyhow!(
                "I/O error while extracting '{}': {e}",
                archive.display()
            )
        }
    }
}

fn convert_build_error(err: BuildError) -> anyhow::Error {
    match err {
        BuildError::Spawn { ref source, .. } if source.kind() == io::ErrorKind::NotFound => {
            anyhow!(
                "{err}\n\
                 HINT: Install Ant or name the program with --ant or ANTJ_ANT."
            )
        }
        other => anyhow::Error::from(other),
    }
}
