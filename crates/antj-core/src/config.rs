//! Launcher and extraction configuration.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::BUILD_FILE;

/// Extraction settings.
///
/// # Examples
///
/// ```
/// use antj_core::ExtractionConfig;
///
/// let config = ExtractionConfig {
///     max_path_depth: 8,
///     ..Default::default()
/// };
/// assert!(config.restore_timestamps);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Apply entry timestamps to extracted files and directories.
    pub restore_timestamps: bool,

    /// Maximum number of components in an entry name.
    pub max_path_depth: usize,
}

impl Default for ExtractionConfig {
    /// Defaults: timestamps restored, depth limited to 32.
    fn default() -> Self {
        Self {
            restore_timestamps: true,
            max_path_depth: 32,
        }
    }
}

/// Launcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Build tool program name or path.
    pub ant_program: OsString,

    /// Build script location relative to the extraction root.
    pub build_file: PathBuf,

    /// Prefix of the temporary extraction root.
    pub temp_prefix: String,

    /// Keep the extraction root after the run.
    pub keep_temp: bool,

    /// Catalog file replacing the built-in messages.
    pub messages_file: Option<PathBuf>,

    /// Catalog locale; `None` means detect from the environment.
    pub locale: Option<String>,

    /// Extraction settings.
    pub extraction: ExtractionConfig,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            ant_program: OsString::from("ant"),
            build_file: PathBuf::from(BUILD_FILE),
            temp_prefix: "antj".to_string(),
            keep_temp: false,
            messages_file: None,
            locale: None,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl LaunchConfig {
    /// Builds a configuration from defaults and the environment.
    ///
    /// Recognized variables: `ANTJ_ANT`, `ANTJ_KEEP_TEMP`, `ANTJ_MESSAGES`
    /// and `ANTJ_LOCALE`. Empty values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Same as [`LaunchConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(program) = var("ANTJ_ANT") {
            config.ant_program = program;
        }
        if let Some(keep) = var("ANTJ_KEEP_TEMP") {
            config.keep_temp = is_truthy(&keep);
        }
        config.messages_file = var("ANTJ_MESSAGES").map(PathBuf::from);
        config.locale = var("ANTJ_LOCALE").map(|value| value.to_string_lossy().into_owned());
        config
    }

    /// Sets the build tool program.
    pub fn with_ant_program(mut self, program: impl Into<OsString>) -> Self {
        self.ant_program = program.into();
        self
    }

    /// Sets whether the extraction root survives the run.
    pub fn with_keep_temp(mut self, keep: bool) -> Self {
        self.keep_temp = keep;
        self
    }

    /// Sets the catalog locale.
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the extraction settings.
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }
}

fn is_truthy(value: &std::ffi::OsStr) -> bool {
    matches!(
        value.to_string_lossy().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
