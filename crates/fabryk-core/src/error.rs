//! Error types for fabryk-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for fabryk-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Filesystem error, tagged with the path being accessed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path that was being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be located, parsed, or validated.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A resource path is malformed.
    #[error("Invalid resource path '{path}': {reason}")]
    InvalidPath {
        /// The offending path as supplied
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// A value could not be parsed from its textual form.
    #[error("Parse error: {message}")]
    Parse {
        /// What failed to parse
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new invalid-path error.
    pub fn invalid_path<P, R>(path: P, reason: R) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }
}
