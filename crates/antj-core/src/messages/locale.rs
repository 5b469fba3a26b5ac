//! Locale detection for the message catalog.

use std::env;
use std::ffi::OsString;
use std::fmt;

/// A catalog locale, reduced to its language code.
///
/// The root locale (empty language) selects the base bundle only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
}

impl Locale {
    /// The root locale.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a POSIX locale name such as `de_DE.UTF-8` or `fr@euro`.
    ///
    /// `C`, `POSIX` and empty names map to the root locale.
    ///
    /// # Examples
    ///
    /// ```
    /// use antj_core::Locale;
    ///
    /// assert_eq!(Locale::parse("de_DE.UTF-8").language(), "de");
    /// assert_eq!(Locale::parse("C"), Locale::root());
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let language = name
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if language.is_empty() || language == "c" || language == "posix" {
            Self::root()
        } else {
            Self { language }
        }
    }

    /// Detects the locale from `LC_ALL`, `LC_MESSAGES` and `LANG`, in that
    /// order.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Same as [`Locale::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.is_empty())
            .map_or_else(Self::root, |value| Self::parse(&value.to_string_lossy()))
    }

    /// Returns the language code, empty for the root locale.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns `true` for the root locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            f.write_str(&self.language)
        }
    }
}
