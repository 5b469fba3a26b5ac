//! Localized user-facing messages.
//!
//! Messages live in `.properties` bundles compiled into the crate: a root
//! bundle plus one bundle per language that overrides it key by key. Every
//! template takes a single positional parameter, `{0}`. The catalog is loaded
//! once at startup and is required: a missing bundle or key is fatal.

mod locale;

pub use locale::Locale;

use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

const ROOT_BUNDLE: &str = include_str!("messages.properties");

const LOCALE_BUNDLES: &[(&str, &str)] = &[("de", include_str!("messages_de.properties"))];

/// Keys of the messages antj prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// A directory could not be created.
    CreateDirFailed,
    /// A directory entry was created.
    Created,
    /// A stored entry was written.
    Extracted,
    /// A deflated entry was written.
    Inflated,
}

impl MessageKey {
    /// Every key a catalog must define.
    pub const ALL: [Self; 4] = [
        Self::CreateDirFailed,
        Self::Created,
        Self::Extracted,
        Self::Inflated,
    ];

    /// Returns the bundle key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateDirFailed => "error.create.dir",
            Self::Created => "out.create",
            Self::Extracted => "out.extracted",
            Self::Inflated => "out.inflated",
        }
    }
}

/// Errors raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("resource for antj is missing: {path}: {source}")]
    Missing {
        /// Catalog file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required key is not defined.
    #[error("missing key {key} in bundle {bundle}")]
    MissingKey {
        /// The absent key.
        key: &'static str,
        /// Bundle name.
        bundle: String,
    },

    /// A line is neither a comment nor `key=value`.
    #[error("malformed line {line} in bundle {bundle}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Bundle name.
        bundle: String,
    },
}

/// Key to template mapping used for user-facing text.
///
/// # Examples
///
/// ```
/// use antj_core::Locale;
/// use antj_core::MessageCatalog;
/// use antj_core::MessageKey;
///
/// let catalog = MessageCatalog::load(&Locale::root()).unwrap();
/// assert_eq!(catalog.format(MessageKey::Extracted, "a.txt"), "extracted: a.txt");
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    bundle: String,
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Loads the built-in catalog for `locale`.
    ///
    /// Unknown languages fall back to the root bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in bundle is malformed or incomplete.
    pub fn load(locale: &Locale) -> Result<Self, CatalogError> {
        let mut templates = parse_properties("root", ROOT_BUNDLE)?;
        let mut bundle = "root".to_string();

        if let Some((language, text)) = LOCALE_BUNDLES
            .iter()
            .find(|(language, _)| *language == locale.language())
        {
            templates.extend(parse_properties(language, text)?);
            bundle = (*language).to_string();
        }

        Self::from_templates(bundle, templates)
    }

    /// Loads a catalog from a properties file, replacing the built-in
    /// bundles entirely.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Missing` if the file cannot be read, and the
    /// other variants if it is malformed or incomplete.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Missing {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle = path.display().to_string();
        let templates = parse_properties(&bundle, &text)?;
        Self::from_templates(bundle, templates)
    }

    fn from_templates(
        bundle: String,
        templates: HashMap<String, String>,
    ) -> Result<Self, CatalogError> {
        if let Some(key) = MessageKey::ALL
            .into_iter()
            .find(|key| !templates.contains_key(key.as_str()))
        {
            return Err(CatalogError::MissingKey {
                key: key.as_str(),
                bundle,
            });
        }
        Ok(Self { bundle, templates })
    }

    /// Returns the name of the most specific bundle in use.
    #[must_use]
    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Formats `key` with `arg` substituted for `{0}`.
    pub fn format(&self, key: MessageKey, arg: impl Display) -> String {
        self.templates.get(key.as_str()).map_or_else(
            || format!("{}: {arg}", key.as_str()),
            |template| template.replace("{0}", &arg.to_string()),
        )
    }
}

/// Parses `key=value` (or `key:value`) lines. `#` and `!` start comments,
/// leading whitespace of a value is dropped, and `\ ` keeps a space.
fn parse_properties(bundle: &str, text: &str) -> Result<HashMap<String, String>, CatalogError> {
    let mut entries = HashMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let Some(split) = line.find(['=', ':']) else {
            return Err(CatalogError::Malformed {
                line: index + 1,
                bundle: bundle.to_string(),
            });
        };

        let key = line[..split].trim_end();
        if key.is_empty() {
            return Err(CatalogError::Malformed {
                line: index + 1,
                bundle: bundle.to_string(),
            });
        }

        let value = unescape(line[split + 1..].trim_start());
        entries.insert(key.to_string(), value);
    }

    Ok(entries)
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('t') => out.push('\t'),
                Some('n') => out.push('\n'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}
