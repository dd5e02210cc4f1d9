//! Error types for simstore
//!
//! Every codec fails fast: the first error is returned to the immediate
//! caller and composed codecs propagate it unchanged with `?`.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for simstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or writing persisted files
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying file could not be opened or created
    #[error("Failed to open {}: {source}", path.display())]
    OpenFailed {
        /// Path that failed to open (the resolved target for link chains)
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Stream-level read failure or a token that does not decode
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Stream-level write failure, or a value the encoding cannot represent
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Header kind mismatch, unknown tag, or structurally invalid data
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Empty or unresolvable file name
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Payload-free discriminant of [`Error`], for matching in callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::OpenFailed`]
    OpenFailed,
    /// See [`Error::ReadFailed`]
    ReadFailed,
    /// See [`Error::WriteFailed`]
    WriteFailed,
    /// See [`Error::InvalidFormat`]
    InvalidFormat,
    /// See [`Error::InvalidPath`]
    InvalidPath,
}

impl Error {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OpenFailed { .. } => ErrorKind::OpenFailed,
            Error::ReadFailed(_) => ErrorKind::ReadFailed,
            Error::WriteFailed(_) => ErrorKind::WriteFailed,
            Error::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Error::InvalidPath(_) => ErrorKind::InvalidPath,
        }
    }

    /// Wrap an I/O error raised while opening `path`
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::OpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O error raised while reading
    pub fn read(source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            Error::ReadFailed("unexpected end of input".to_string())
        } else {
            Error::ReadFailed(source.to_string())
        }
    }

    /// Wrap an I/O error raised while writing
    pub fn write(source: io::Error) -> Self {
        Error::WriteFailed(source.to_string())
    }
}
