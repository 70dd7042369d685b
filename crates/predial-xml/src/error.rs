//! Error types for XML loading and parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when building an element tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The resource could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Syntax error reported by the reader, or content the tree cannot hold.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// The input contains no element at all.
    #[error("no element found")]
    Empty,

    /// End of input reached with elements still open.
    #[error("unclosed element <{name}> at end of input")]
    Unclosed { name: String },

    /// A second top-level element follows the root.
    #[error("junk after document element at byte {position}")]
    TrailingContent { position: u64 },

    /// A parse failure tied to the resource it came from.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<XmlError>,
    },
}

/// Result type alias for XML operations.
pub type Result<T> = std::result::Result<T, XmlError>;

impl XmlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(position: u64, message: impl std::fmt::Display) -> Self {
        Self::Malformed {
            position,
            message: message.to_string(),
        }
    }

    pub(crate) fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self::Parse {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
