//! Caller identity middleware.
//!
//! Authentication happens in front of this service. The authenticating proxy
//! forwards the caller's identity in two headers:
//!
//! - `X-Fabryk-Principal`: the user name (absent for anonymous callers)
//! - `X-Fabryk-Groups`: comma-separated group names
//!
//! `IdentityLayer` turns those headers into a [`Caller`] and inserts it into
//! the request extensions. Principals listed as superusers in configuration
//! are classified as superusers.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderMap, Request};
use axum::response::IntoResponse;
use tower::{Layer, Service};

use fabryk_acl::{Caller, PrincipalClass, PrincipalSet};

/// Header carrying the authenticated user name.
pub const PRINCIPAL_HEADER: &str = "x-fabryk-principal";

/// Header carrying comma-separated group names.
pub const GROUPS_HEADER: &str = "x-fabryk-groups";

/// Which principals are superusers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    superusers: BTreeSet<String>,
}

impl IdentityConfig {
    /// Configure the superuser principals.
    pub fn new<I, S>(superusers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            superusers: superusers.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `principal` is a configured superuser.
    pub fn is_superuser(&self, principal: &str) -> bool {
        self.superusers.contains(principal)
    }

    /// Build the caller described by `headers`.
    pub fn caller_from_headers(&self, headers: &HeaderMap) -> Caller {
        let user = header_str(headers, PRINCIPAL_HEADER)
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let groups = header_str(headers, GROUPS_HEADER)
            .map(|raw| raw.split(',').collect::<Vec<_>>())
            .unwrap_or_default();

        let principals = match user {
            Some(name) => PrincipalSet::for_user(name),
            None => PrincipalSet::anonymous(),
        }
        .with_groups(groups);

        let class = match user {
            Some(name) if self.is_superuser(name) => PrincipalClass::Superuser,
            _ => PrincipalClass::Ordinary,
        };
        Caller { principals, class }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Tower `Layer` that attaches a [`Caller`] to every request.
#[derive(Clone)]
pub struct IdentityLayer {
    config: Arc<IdentityConfig>,
}

impl IdentityLayer {
    /// Create a new identity layer.
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityService {
            inner,
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that inserts the request's [`Caller`] into extensions.
#[derive(Clone)]
pub struct IdentityService<S> {
    inner: S,
    config: Arc<IdentityConfig>,
}

impl<S> Service<Request<Body>> for IdentityService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let caller = self.config.caller_from_headers(req.headers());
        tracing::trace!(principals = %caller.principals, class = ?caller.class, "caller identified");
        req.extensions_mut().insert(caller);

        Box::pin(async move {
            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}
