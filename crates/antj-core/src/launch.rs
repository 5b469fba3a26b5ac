//! Launch orchestration: extract, then build.

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::path::MAIN_SEPARATOR;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::trace;
use log::warn;
use zip::ZipArchive;

use crate::ExtractionError;
use crate::LaunchConfig;
use crate::LaunchError;
use crate::LaunchReport;
use crate::extraction::extract_zip;
use crate::invoke::AntProcess;
use crate::invoke::BuildInvocation;
use crate::invoke::BuildRunner;
use crate::messages::CatalogError;
use crate::messages::Locale;
use crate::messages::MessageCatalog;
use crate::types::DestDir;

/// Where the archive comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource {
    /// A zip file on disk.
    Path(PathBuf),
    /// A container that is itself a zip carrying the build file, typically
    /// the running executable with an archive appended.
    Embedded(PathBuf),
}

impl ArchiveSource {
    /// The running executable as an embedded source.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::OpenArchive` if the executable path is unknown.
    pub fn current_executable() -> Result<Self, LaunchError> {
        env::current_exe()
            .map(Self::Embedded)
            .map_err(|source| LaunchError::OpenArchive {
                path: PathBuf::from("<current executable>"),
                source,
            })
    }

    /// Returns the archive or container path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Path(path) | Self::Embedded(path) => path,
        }
    }

    /// Opens the zip archive this source refers to.
    ///
    /// # Errors
    ///
    /// - `LaunchError::OpenArchive` if the file cannot be opened
    /// - `LaunchError::Extraction` if a path source is not a zip container
    /// - `LaunchError::Unsupported` if an embedded container is not a zip
    ///   carrying `build_file`
    pub fn open(&self, build_file: &Path) -> Result<ZipArchive<File>, LaunchError> {
        let file = File::open(self.path()).map_err(|source| LaunchError::OpenArchive {
            path: self.path().to_path_buf(),
            source,
        })?;

        match self {
            Self::Path(_) => ZipArchive::new(file)
                .map_err(|e| LaunchError::Extraction(ExtractionError::Zip(e))),
            Self::Embedded(container) => open_embedded(container, file, build_file),
        }
    }
}

fn open_embedded(
    container: &Path,
    file: File,
    build_file: &Path,
) -> Result<ZipArchive<File>, LaunchError> {
    let entry_name = build_file.to_string_lossy().replace(MAIN_SEPARATOR, "/");

    match ZipArchive::new(file) {
        Ok(archive) if archive.index_for_name(&entry_name).is_some() => Ok(archive),
        Ok(_) => Err(LaunchError::Unsupported {
            container: container.to_path_buf(),
            reason: format!("archive does not carry {entry_name}"),
        }),
        Err(e) => {
            debug!("{} is not a zip container: {e}", container.display());
            let loose = container
                .parent()
                .is_some_and(|dir| dir.join(build_file).is_file());
            Err(LaunchError::Unsupported {
                container: container.to_path_buf(),
                reason: if loose {
                    "loose files are not supported".to_string()
                } else {
                    "not a zip container".to_string()
                },
            })
        }
    }
}

/// Loads the catalog named by `config`: the override file if set, the
/// built-in bundles for the configured or detected locale otherwise.
///
/// # Errors
///
/// Returns an error if the override file is missing or any bundle is
/// incomplete.
pub fn load_catalog(config: &LaunchConfig) -> Result<MessageCatalog, CatalogError> {
    if let Some(path) = &config.messages_file {
        return MessageCatalog::from_file(path);
    }
    let locale = config
        .locale
        .as_deref()
        .map_or_else(Locale::from_env, Locale::parse);
    MessageCatalog::load(&locale)
}

/// Extracts an archive into a fresh temporary directory and runs the build
/// in it.
///
/// # Examples
///
/// ```no_run
/// use antj_core::ArchiveSource;
/// use antj_core::LaunchConfig;
/// use antj_core::Launcher;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LaunchConfig::from_env().with_keep_temp(true);
/// let launcher = Launcher::new(config)?;
/// let report = launcher.launch(&ArchiveSource::Path("build.zip".into()), &[])?;
/// println!("kept {}", report.extraction_root.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Launcher<R = AntProcess> {
    config: LaunchConfig,
    catalog: MessageCatalog,
    runner: R,
}

impl Launcher<AntProcess> {
    /// Creates a launcher that runs the configured program as a process.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::Catalog` if the message catalog is unavailable.
    pub fn new(config: LaunchConfig) -> Result<Self, LaunchError> {
        let catalog = load_catalog(&config)?;
        let runner = AntProcess::new(config.ant_program.clone());
        Ok(Self::with_runner(config, catalog, runner))
    }
}

impl<R: BuildRunner> Launcher<R> {
    /// Creates a launcher with a custom build runner.
    pub fn with_runner(config: LaunchConfig, catalog: MessageCatalog, runner: R) -> Self {
        Self {
            config,
            catalog,
            runner,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Returns the build runner.
    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Extracts `source` and runs the build with `args`.
    ///
    /// The extraction root is removed before returning unless
    /// `keep_temp` is set, whether or not the launch succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first failure. A failed extraction never starts the
    /// build.
    pub fn launch(
        &self,
        source: &ArchiveSource,
        args: &[OsString],
    ) -> Result<LaunchReport, LaunchError> {
        let temp = tempfile::Builder::new()
            .prefix(&self.config.temp_prefix)
            .disable_cleanup(self.config.keep_temp)
            .tempdir()
            .map_err(LaunchError::TempDir)?;
        trace!("Using temporary path {}", temp.path().display());

        let kept = self.config.keep_temp;
        let report = match self.extract_and_build(temp.path(), source, args) {
            Ok(report) => report,
            Err(e) => {
                if kept {
                    warn!("launch failed, extraction root kept at {}", temp.path().display());
                }
                return Err(e);
            }
        };

        if !kept && let Err(e) = temp.close() {
            warn!("failed to remove {}: {e}", report.extraction_root.display());
        }

        Ok(LaunchReport { kept, ..report })
    }

    fn extract_and_build(
        &self,
        root: &Path,
        source: &ArchiveSource,
        args: &[OsString],
    ) -> Result<LaunchReport, LaunchError> {
        let mut archive = source.open(&self.config.build_file)?;

        let dest = DestDir::new(root)?;
        let extraction = extract_zip(&mut archive, &dest, &self.config.extraction, &self.catalog)?;
        debug!(
            "extracted {} files and {} directories from {}",
            extraction.files_extracted,
            extraction.directories_created,
            source.path().display()
        );

        let invocation = BuildInvocation {
            working_dir: dest.as_path().to_path_buf(),
            build_file: self.config.build_file.clone(),
            args: args.to_vec(),
        };
        let command = self.runner.command_line(&invocation);
        self.runner.run(&invocation)?;

        Ok(LaunchReport {
            extraction,
            extraction_root: invocation.working_dir,
            kept: false,
            command,
        })
    }
}
