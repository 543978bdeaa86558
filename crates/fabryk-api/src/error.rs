//! Error types for fabryk-api

use thiserror::Error;

/// Result type alias for fabryk-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-api
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

    /// Listener or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The endpoint exists but does not accept this method.
    #[error("{method} is not supported on {path}")]
    MethodNotAllowed {
        /// Request method
        method: &'static str,
        /// Request path as received
        path: String,
    },

    /// No endpoint matches the request path.
    #[error("No endpoint at {path}")]
    UnknownEndpoint {
        /// Request path as received
        path: String,
    },
}
