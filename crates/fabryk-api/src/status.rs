//! Mapping of errors to HTTP status codes and JSON error bodies.
//!
//! | error                                   | status |
//! |-----------------------------------------|--------|
//! | validation, malformed path              | 400    |
//! | forbidden, root prohibited              | 403    |
//! | ACL not found, resource not found       | 404    |
//! | method not allowed on endpoint          | 405    |
//! | lifecycle conflict                      | 409    |
//! | resource gone (tombstoned)              | 410    |
//! | store and everything else               | 500    |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::Error;

/// Status code for an ACL error.
pub fn acl_status(err: &fabryk_acl::Error) -> StatusCode {
    use fabryk_acl::Error as Acl;

    match err {
        Acl::Validation { .. } => StatusCode::BAD_REQUEST,
        Acl::Forbidden { .. } | Acl::RootProhibited => StatusCode::FORBIDDEN,
        Acl::AclNotFound { .. } | Acl::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        Acl::ResourceGone { .. } => StatusCode::GONE,
        Acl::Core(core) => core_status(core),
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status code for a core error.
pub fn core_status(err: &fabryk_core::Error) -> StatusCode {
    match err {
        fabryk_core::Error::InvalidPath { .. } | fabryk_core::Error::Parse { .. } => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl Error {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Acl(err) => acl_status(err),
            Error::Core(err) => core_status(err),
            Error::Storage(fabryk_storage::Error::Acl(err)) => acl_status(err),
            Error::Storage(fabryk_storage::Error::Lifecycle { .. }) => StatusCode::CONFLICT,
            Error::UnknownEndpoint { .. } => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used as `error.category` in responses.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Acl(err) | Error::Storage(fabryk_storage::Error::Acl(err)) => err.category(),
            Error::Core(fabryk_core::Error::InvalidPath { .. }) => "invalid_path",
            Error::Core(_) => "core",
            Error::Storage(fabryk_storage::Error::Lifecycle { .. }) => "conflict",
            Error::Storage(_) => "storage",
            Error::Io(_) => "io",
            Error::UnknownEndpoint { .. } => "not_found",
            Error::MethodNotAllowed { .. } => "method_not_allowed",
        }
    }
}

/// Build a JSON error response.
pub fn error_response(status: StatusCode, category: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "error": {
            "category": category,
            "message": message,
        }
    });
    (status, Json(body)).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        error_response(status, self.category(), &self.to_string())
    }
}
