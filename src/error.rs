//! Error types for groot.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for groot operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The specified path does not contain a groot repository.
    #[error("not a groot repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// The requested object was not found in the object store.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The specified path was not found.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The provided string is not a valid (or is an ambiguous) object ID.
    #[error("invalid object id: {0}")]
    InvalidOid(String),

    /// The stored data does not have the expected shape.
    #[error("invalid object {oid}: {reason}")]
    InvalidObject {
        /// The object ID, or the name of the file holding the bad data.
        oid: String,
        /// The reason for invalidity.
        reason: String,
    },

    /// The staging index file could not be parsed.
    #[error("invalid index: {0}")]
    InvalidIndex(String),
}

/// Result type alias for groot operations.
pub type Result<T> = std::result::Result<T, Error>;
