//! Validated path wrappers for extraction.
//!
//! Both types can only be built through validation, so every destination
//! path the extractor writes to is `DestDir::join(&SafePath)`.

pub mod dest_dir;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use safe_path::SafePath;
