//! Zip extraction and build invocation for the antj launcher.
//!
//! `antj-core` unpacks a zip archive into a fresh temporary directory and
//! runs Ant against the build script `.antj/build.xml` inside it, forwarding
//! any extra arguments. Entry names are validated so nothing is written
//! outside the extraction root, and entry timestamps are restored on the
//! extracted files and directories.
//!
//! # Examples
//!
//! ```no_run
//! use antj_core::ArchiveSource;
//! use antj_core::LaunchConfig;
//! use antj_core::Launcher;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let launcher = Launcher::new(LaunchConfig::default())?;
//! let source = ArchiveSource::Path("project.zip".into());
//! let report = launcher.launch(&source, &["dist".into()])?;
//! println!("Extracted {} files", report.extraction.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod invoke;
pub mod launch;
pub mod messages;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

pub use config::ExtractionConfig;
pub use config::LaunchConfig;
pub use error::ExtractionError;
pub use error::LaunchError;
pub use error::Result;
pub use extraction::extract_archive;
pub use extraction::extract_zip;
pub use invoke::AntProcess;
pub use invoke::BuildError;
pub use invoke::BuildInvocation;
pub use invoke::BuildRunner;
pub use launch::ArchiveSource;
pub use launch::Launcher;
pub use messages::CatalogError;
pub use messages::Locale;
pub use messages::MessageCatalog;
pub use messages::MessageKey;
pub use report::ExtractionReport;
pub use report::LaunchReport;

pub use types::DestDir;
pub use types::SafePath;

/// Build script location, relative to the extraction root.
pub const BUILD_FILE: &str = ".antj/build.xml";
