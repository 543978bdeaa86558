//! End-to-end flows through the HTTP binding.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fabryk_acl::RoleMatrix;
use fabryk_api::identity::{GROUPS_HEADER, PRINCIPAL_HEADER};
use fabryk_api::{AppState, IdentityConfig, router};
use fabryk_storage::RepositorySeed;
use tower::ServiceExt;

use crate::common::{SCENARIO, SUPERUSER};

fn app() -> Router {
    let repo = RepositorySeed::from_json_str(SCENARIO)
        .unwrap()
        .into_repository()
        .unwrap();
    let state = AppState::from_repository(RoleMatrix::basic(), Arc::new(repo));
    router(state, IdentityConfig::new([SUPERUSER]))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    groups: Option<&str>,
    body: &str,
) -> (StatusCode, Option<String>, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(PRINCIPAL_HEADER, user);
    }
    if let Some(groups) = groups {
        builder = builder.header(GROUPS_HEADER, groups);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, location, json)
}

#[tokio::test]
async fn test_delegation_flow() {
    let app = app();

    // alice (admin on /a) delegates /a/b to the editors group.
    let (status, location, _) = call(
        &app,
        "POST",
        "/a/b/fcr:accessroles",
        Some("alice"),
        None,
        r#"{"editors": ["writer"], "alice": ["admin"]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/a/b/fcr:accessroles"));

    // dave, in editors, may update content on /a/b and below.
    let (status, _, verdict) = call(
        &app,
        "GET",
        "/a/b/fcr:access?action=UPDATE_CONTENT",
        Some("dave"),
        Some("editors"),
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verdict["decision"], "allow");
    assert_eq!(verdict["reason"]["kind"], "granted");
    assert_eq!(verdict["reason"]["governing"], "/a/b");

    // ...but not manage its ACL.
    let (status, _, body) = call(
        &app,
        "GET",
        "/a/b/fcr:access?action=MANAGE_ACL",
        Some("dave"),
        Some("editors"),
        "",
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["category"], "forbidden");

    // Anonymous readers lost access: the new ACL has no EVERYONE entry.
    let (status, _, _) = call(&app, "GET", "/a/b/fcr:access?action=READ", None, None, "").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Deleting the ACL restores inheritance from /a.
    let (status, _, _) =
        call(&app, "DELETE", "/a/b/fcr:accessroles", Some("alice"), None, "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) = call(&app, "GET", "/a/b/fcr:access?action=READ", None, None, "").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) =
        call(&app, "GET", "/a/b/fcr:accessroles", Some("alice"), None, "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_status_mapping() {
    let app = app();
    let cases: [(&str, &str, Option<&str>, &str, StatusCode); 9] = [
        ("GET", "/a/fcr:accessroles", Some("alice"), "", StatusCode::OK),
        ("GET", "/a/b/fcr:accessroles", Some("alice"), "", StatusCode::NO_CONTENT),
        ("POST", "/a/b/fcr:accessroles", Some("alice"), "{}", StatusCode::BAD_REQUEST),
        ("POST", "/fcr:accessroles", Some(SUPERUSER), r#"{"a": ["admin"]}"#, StatusCode::FORBIDDEN),
        ("DELETE", "/a/b/fcr:accessroles", Some("alice"), "", StatusCode::NOT_FOUND),
        ("GET", "/a/d/fcr:access?action=READ", Some("alice"), "", StatusCode::FORBIDDEN),
        ("GET", "/a/d/fcr:access?action=READ", Some(SUPERUSER), "", StatusCode::GONE),
        ("GET", "/a/d/e/fcr:access?action=READ", Some(SUPERUSER), "", StatusCode::NOT_FOUND),
        ("GET", "/x/y/fcr:access?action=READ", Some("alice"), "", StatusCode::FORBIDDEN),
    ];
    for (method, uri, user, body, expected) in cases {
        let (status, _, _) = call(&app, method, uri, user, None, body).await;
        assert_eq!(status, expected, "{method} {uri} as {user:?}");
    }
}

#[tokio::test]
async fn test_effective_acl() {
    let app = app();
    let (status, _, acl) = call(
        &app,
        "GET",
        "/a/b/fcr:accessroles?effective=true",
        Some("alice"),
        None,
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(acl["EVERYONE"], serde_json::json!(["reader"]));
    assert_eq!(acl["alice"], serde_json::json!(["admin"]));
}
