//! Error types for fabryk-acl

use thiserror::Error;

use fabryk_core::ResourcePath;

use crate::model::Action;

/// Result type alias for fabryk-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-acl
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fabryk-core
    #[error("Core error: {0}")]
    Core(#[from] fabryk_core::Error),

    /// An ACL payload is malformed.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// No ACL is directly attached to the resource.
    #[error("No access roles attached to {path}")]
    AclNotFound {
        /// Resource that was addressed
        path: ResourcePath,
    },

    /// ACLs on the repository root cannot be changed.
    #[error("Access roles on the repository root cannot be modified")]
    RootProhibited,

    /// The caller is not permitted to perform the action.
    #[error("{action} denied on {path}")]
    Forbidden {
        /// Resource that was addressed
        path: ResourcePath,
        /// Action that was required
        action: Action,
    },

    /// The resource does not exist.
    #[error("Resource not found: {path}")]
    ResourceNotFound {
        /// Resource that was addressed
        path: ResourcePath,
    },

    /// The resource was deleted and only a tombstone remains.
    #[error("Resource has been deleted: {path}")]
    ResourceGone {
        /// Resource that was addressed
        path: ResourcePath,
    },

    /// The underlying hierarchy or ACL store failed.
    #[error("Store error: {message}")]
    Store {
        /// What failed
        message: String,
    },
}

impl Error {
    /// Creates a validation error without a field.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a validation error tied to a field.
    pub fn validation_field<F, S>(field: F, message: S) -> Self
    where
        F: Into<String>,
        S: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a store error.
    pub fn store<S: Into<String>>(message: S) -> Self {
        Error::Store {
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(path: &ResourcePath, action: Action) -> Self {
        Error::Forbidden {
            path: path.clone(),
            action,
        }
    }

    /// Short machine-readable label for this error.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Core(_) => "core",
            Error::Validation { .. } => "validation",
            Error::AclNotFound { .. } => "acl_not_found",
            Error::RootProhibited => "root_prohibited",
            Error::Forbidden { .. } => "forbidden",
            Error::ResourceNotFound { .. } => "not_found",
            Error::ResourceGone { .. } => "gone",
            Error::Store { .. } => "store",
        }
    }

    /// Whether this error is caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Store { .. } => false,
            Error::Core(e) => matches!(
                e,
                fabryk_core::Error::InvalidPath { .. } | fabryk_core::Error::Parse { .. }
            ),
            _ => true,
        }
    }
}
