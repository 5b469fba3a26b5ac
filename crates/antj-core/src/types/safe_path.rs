//! Validated entry path type.

use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::Result;
use std::path::Component;
use std::path::MAIN_SEPARATOR_STR;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// A zip entry name converted to a relative path that stays inside the
/// extraction root.
///
/// `SafePath` rejects:
/// - parent directory components (`..`)
/// - absolute names and drive prefixes
/// - null bytes
/// - names deeper than [`ExtractionConfig::max_path_depth`]
///
/// `.` components are dropped. There is no `From<PathBuf>`; the only way to
/// get a `SafePath` is [`SafePath::from_entry_name`].
///
/// # Examples
///
/// ```no_run
/// use antj_core::ExtractionConfig;
/// use antj_core::types::DestDir;
/// use antj_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp")?;
/// let config = ExtractionConfig::default();
///
/// let safe = SafePath::from_entry_name(".antj/build.xml", &dest, &config)?;
/// assert!(SafePath::from_entry_name("../etc/passwd", &dest, &config).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates a `/`-separated entry name.
    ///
    /// A name that normalizes to nothing (`""`, `"./"`) yields the root path;
    /// see [`SafePath::is_root`].
    ///
    /// # Errors
    ///
    /// - `ExtractionError::PathTraversal` for `..`, absolute names or prefixes,
    ///   or a name whose existing parent resolves outside `dest`
    /// - `ExtractionError::SecurityViolation` for null bytes or excess depth
    pub fn from_entry_name(name: &str, dest: &DestDir, config: &ExtractionConfig) -> Result<Self> {
        if name.contains('\0') {
            return Err(ExtractionError::SecurityViolation {
                reason: format!("entry name contains null bytes: {}", name.escape_default()),
            });
        }

        let native = name.replace('/', MAIN_SEPARATOR_STR);
        let mut normalized = PathBuf::new();
        let mut depth = 0;

        for component in Path::new(&native).components() {
            match component {
                Component::Normal(part) => {
                    depth += 1;
                    normalized.push(part);
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ExtractionError::PathTraversal {
                        path: PathBuf::from(name),
                    });
                }
            }
        }

        if depth > config.max_path_depth {
            return Err(ExtractionError::SecurityViolation {
                reason: format!(
                    "path depth {depth} exceeds maximum {}: {name}",
                    config.max_path_depth
                ),
            });
        }

        if depth == 0 {
            return Ok(Self(normalized));
        }

        // A directory inside the root may be a symlink to somewhere else.
        let resolved = dest.as_path().join(&normalized);
        if let Some(parent) = resolved.parent() {
            match parent.canonicalize() {
                Ok(canonical) if !canonical.starts_with(dest.as_path()) => {
                    return Err(ExtractionError::PathTraversal {
                        path: PathBuf::from(name),
                    });
                }
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ExtractionError::Io(std::io::Error::new(
                        e.kind(),
                        format!("failed to canonicalize parent of {name}: {e}"),
                    )));
                }
            }
        }

        Ok(Self(normalized))
    }

    /// Returns `true` if the name normalized to the extraction root itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}
