//! # fabryk-api
//!
//! HTTP binding for the Fabryk ACL engine.
//!
//! Routes, relative to any resource path:
//!
//! - `GET {path}/fcr:accessroles[?effective]`: read the direct (or governing) ACL
//! - `POST {path}/fcr:accessroles`: create or replace the direct ACL
//! - `DELETE {path}/fcr:accessroles`: remove the direct ACL
//! - `GET {path}/fcr:access?action=ACTION`: decision probe
//! - `GET /health`
//!
//! Callers are identified by headers set by an authenticating front end; see
//! [`identity`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod identity;
pub mod routes;
pub mod server;
pub mod state;
pub mod status;

pub use error::{Error, Result};
pub use identity::{IdentityConfig, IdentityLayer};
pub use routes::router;
pub use server::{Server, ServerConfig};
pub use state::AppState;
