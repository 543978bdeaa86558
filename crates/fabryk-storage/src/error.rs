//! Error types for fabryk-storage

use thiserror::Error;

use fabryk_core::ResourcePath;

/// Result type alias for fabryk-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fabryk-core
    #[error("Core error: {0}")]
    Core(#[from] fabryk_core::Error),

    /// Error from fabryk-acl
    #[error(transparent)]
    Acl(#[from] fabryk_acl::Error),

    /// A node lifecycle operation is not valid in the current state.
    #[error("Cannot modify {path}: {message}")]
    Lifecycle {
        /// Node that was addressed
        path: ResourcePath,
        /// Why the operation was refused
        message: String,
    },

    /// A seed file is inconsistent.
    #[error("Seed error: {message}")]
    Seed {
        /// What is wrong with the seed
        message: String,
    },

    /// JSON seed could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML seed could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Creates a lifecycle error.
    pub fn lifecycle<S: Into<String>>(path: &ResourcePath, message: S) -> Self {
        Error::Lifecycle {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Creates a seed error.
    pub fn seed<S: Into<String>>(message: S) -> Self {
        Error::Seed {
            message: message.into(),
        }
    }
}
