//! Error types for registry queries.

use std::path::PathBuf;

use predial_xml::XmlError;

/// Errors that can occur while querying registry files and folders.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A registry file could not be read or parsed into an element tree.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// A folder or output file could not be accessed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for registry queries.
pub type Result<T> = std::result::Result<T, QueryError>;

impl QueryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
