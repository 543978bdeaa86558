//! Error types for fabryk-cli

use thiserror::Error;

/// Result type alias for fabryk-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fabryk-core
    #[error("Core error: {0}")]
    Core(#[from] fabryk_core::Error),

    /// Error from fabryk-acl
    #[error(transparent)]
    Acl(#[from] fabryk_acl::Error),

    /// Error from fabryk-storage
    #[error("Storage error: {0}")]
    Storage(#[from] fabryk_storage::Error),

    /// Error from fabryk-api
    #[error("Server error: {0}")]
    Api(#[from] fabryk_api::Error),
}
