//! Error types for extraction and launch operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::invoke::BuildError;
use crate::messages::CatalogError;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while extracting an archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted, truncated or not a zip container.
    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A directory could not be created, or a non-directory is in its way.
    ///
    /// `message` is the localized `error.create.dir` text.
    #[error("{message}")]
    CreateDirectory {
        /// The directory that could not be created.
        path: PathBuf,
        /// Localized description.
        message: String,
    },

    /// Entry name resolves outside the extraction root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: PathBuf,
    },

    /// Entry name rejected by validation for another reason.
    #[error("operation denied by security policy: {reason}")]
    SecurityViolation {
        /// Reason for the violation.
        reason: String,
    },
}

impl ExtractionError {
    /// Returns `true` if this error was raised by entry name validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use antj_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::SecurityViolation { .. }
        )
    }
}

/// Errors that abort a launch.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The message catalog could not be loaded at startup.
    #[error("fatal: message catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    /// The temporary extraction root could not be created.
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// The archive could not be opened.
    #[error("failed to open archive {path}: {source}")]
    OpenArchive {
        /// Archive path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program is packaged in a form that does not carry an archive.
    #[error("unsupported container {container}: {reason}")]
    Unsupported {
        /// The container that was inspected.
        container: PathBuf,
        /// Why it cannot be used.
        reason: String,
    },

    /// Extraction failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The build tool could not be run or reported failure.
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_traversal_error() {
        let err = ExtractionError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
    }

    #[test]
    fn test_create_directory_uses_message() {
        let err = ExtractionError::CreateDirectory {
            path: PathBuf::from("out/a"),
            message: "out/a : could not create directory".into(),
        };
        assert_eq!(err.to_string(), "out/a : could not create directory");
        assert!(!err.is_security_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExtractionError = io_err.into();
        assert!(matches!(err, ExtractionError::Io(_)));
    }

    #[test]
    fn test_launch_error_is_transparent_for_extraction() {
        let err: LaunchError = ExtractionError::SecurityViolation {
            reason: "empty entry name".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "operation denied by security policy: empty entry name"
        );
    }

    #[test]
    fn test_unsupported_display() {
        let err = LaunchError::Unsupported {
            container: PathBuf::from("/opt/antj"),
            reason: "loose files".into(),
        };
        let display = err.to_string();
        assert!(display.contains("unsupported"));
        assert!(display.contains("loose files"));
    }
}
