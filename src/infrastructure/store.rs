//! Links file loading.
//!
//! The links file is a JSON object mapping short names to absolute URLs:
//!
//! ```json
//! {
//!   "docs": "https://docs.example.com/",
//!   "search": "https://www.example.com/search?source=goto"
//! }
//! ```
//!
//! Loading is all-or-nothing: one bad entry fails the whole file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::domain::link_map::{LinkMap, Target, is_valid_name};

/// Errors that can occur while loading a links file.
///
/// [`LoadError::Io`] means the file could not be read; every other variant
/// means its contents are invalid.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid links file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid link name '{name}': names must be non-empty and contain no '/'")]
    InvalidName { name: String },

    #[error("invalid target for '{name}' ({value}): {source}")]
    InvalidTarget {
        name: String,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid target for '{name}' ({value}): URL has no path to redirect into")]
    CannotBeABase { name: String, value: String },
}

impl LoadError {
    /// Returns true if the file itself could not be read.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Reads and parses the links file at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or any other
/// [`LoadError`] variant if its contents are invalid.
pub fn load(path: &Path) -> Result<LinkMap, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(path, &contents)
}

/// Parses links file contents read from `path`. The path is only used to
/// describe errors.
///
/// # Errors
///
/// See [`load`].
pub fn parse(path: &Path, contents: &str) -> Result<LinkMap, LoadError> {
    let raw: BTreeMap<String, String> =
        serde_json::from_str(contents).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    raw.into_iter()
        .map(|(name, value)| {
            if !is_valid_name(&name) {
                return Err(LoadError::InvalidName { name });
            }

            let url = match Url::parse(&value) {
                Ok(url) => url,
                Err(source) => {
                    return Err(LoadError::InvalidTarget {
                        name,
                        value,
                        source,
                    });
                }
            };

            if url.cannot_be_a_base() {
                return Err(LoadError::CannotBeABase { name, value });
            }

            Ok((name, Target::new(url)))
        })
        .collect()
}
