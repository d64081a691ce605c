use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

/// Errors produced while loading assets, catalogs and maps, or on strict lookups.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The sprite atlas could not be decoded or sliced into whole cells.
    #[error("Invalid sprite atlas {path}: {reason}")]
    AssetFormat {
        /// Atlas the failure refers to (`<memory>` for in-memory atlases)
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// A tile catalog record is malformed. `line` is 1-based.
    #[error("Invalid tile catalog record at line {line}: {reason}")]
    ConfigFormat {
        /// Offending line
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// A persisted map is malformed or references tiles the catalog doesn't know.
    #[error("Invalid map record at line {line}: {reason}")]
    MapFormat {
        /// Offending line (0 when the problem isn't tied to a line)
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// `save` was called on a map that was never loaded from or bound to a file.
    #[error("Map has no source file to save to")]
    NoSource,

    /// Strict lookup outside of its domain.
    #[error("{what} {value} is out of range (bound {bound})")]
    OutOfRange {
        /// Name of the looked-up quantity
        what: &'static str,
        /// Requested value
        value: i64,
        /// Exclusive upper bound of the domain
        bound: i64,
    },

    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// JSON configuration could not be parsed
    #[error("Invalid configuration file {path}: {source}")]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn config(line: usize, reason: impl Into<String>) -> Self {
        Error::ConfigFormat {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn map(line: usize, reason: impl Into<String>) -> Self {
        Error::MapFormat {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, value: i64, bound: i64) -> Self {
        Error::OutOfRange { what, value, bound }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
