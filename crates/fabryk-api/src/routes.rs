//! Router and handlers.
//!
//! Every resource path is routed through a single wildcard. The last
//! segment selects the endpoint: `fcr:accessroles` for the ACL sub-resource
//! and `fcr:access` for the decision probe.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower_http::trace::TraceLayer;

use fabryk_acl::{Action, Caller};
use fabryk_core::ResourcePath;

use crate::identity::{IdentityConfig, IdentityLayer};
use crate::state::AppState;
use crate::{Error, Result};

/// Last path segment addressing a resource's ACL.
pub const ACCESS_ROLES_SEGMENT: &str = "fcr:accessroles";

/// Last path segment addressing the decision probe.
pub const ACCESS_PROBE_SEGMENT: &str = "fcr:access";

/// Build the application router.
pub fn router(state: AppState, identity: IdentityConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/{*path}",
            get(get_resource)
                .post(post_resource)
                .delete(delete_resource),
        )
        .layer(IdentityLayer::new(identity))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `Location` of the ACL sub-resource of `path`.
pub fn access_roles_location(path: &ResourcePath) -> Result<String> {
    Ok(path.child(ACCESS_ROLES_SEGMENT)?.to_string())
}

// ============================================================================
// Endpoint selection
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Endpoint {
    AccessRoles(ResourcePath),
    Access(ResourcePath),
}

fn endpoint(raw: &str) -> Result<Endpoint> {
    let full = ResourcePath::parse(raw)?;
    let unknown = || Error::UnknownEndpoint {
        path: format!("/{raw}"),
    };
    let target = full.parent().ok_or_else(unknown)?;
    match full.name() {
        Some(ACCESS_ROLES_SEGMENT) => Ok(Endpoint::AccessRoles(target)),
        Some(ACCESS_PROBE_SEGMENT) => Ok(Endpoint::Access(target)),
        _ => Err(unknown()),
    }
}

fn access_roles_only(raw: &str, method: &'static str) -> Result<ResourcePath> {
    match endpoint(raw)? {
        Endpoint::AccessRoles(path) => Ok(path),
        Endpoint::Access(_) => Err(Error::MethodNotAllowed {
            method,
            path: format!("/{raw}"),
        }),
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_resource(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(raw): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Response> {
    match endpoint(&raw)? {
        Endpoint::AccessRoles(path) => {
            let effective = params.contains_key("effective");
            match state.gateway().get_acl(&caller, &path, effective)? {
                Some(acl) => Ok(Json(acl).into_response()),
                None => Ok(StatusCode::NO_CONTENT.into_response()),
            }
        }
        Endpoint::Access(path) => {
            let action = params.get("action").ok_or_else(|| {
                fabryk_acl::Error::validation_field("action", "missing `action` query parameter")
            })?;
            let action = action.parse::<Action>()?;
            let verdict = state.gateway().check(&caller, &path, action)?;
            Ok(Json(verdict).into_response())
        }
    }
}

async fn post_resource(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(raw): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let path = access_roles_only(&raw, "POST")?;
    let outcome = state.gateway().set_acl_json(&caller, &path, &body)?;
    tracing::info!(%path, ?outcome, "access roles stored");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, access_roles_location(&path)?)],
    )
        .into_response())
}

async fn delete_resource(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(raw): Path<String>,
) -> Result<Response> {
    let path = access_roles_only(&raw, "DELETE")?;
    state.gateway().delete_acl(&caller, &path)?;
    tracing::info!(%path, "access roles removed");
    Ok(StatusCode::NO_CONTENT.into_response())
}

// ============================================================================
// Tests
// ============================================================================
