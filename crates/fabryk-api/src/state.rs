//! Shared handler state.

use std::sync::Arc;

use fabryk_acl::{AclGateway, AclStore, DecisionEngine, HierarchyView, RoleMatrix};

/// State cloned into every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    gateway: AclGateway,
}

impl AppState {
    /// Wrap an existing gateway.
    pub fn new(gateway: AclGateway) -> Self {
        Self { gateway }
    }

    /// Build state over a repository that is both hierarchy and ACL store.
    pub fn from_repository<R>(matrix: RoleMatrix, repository: Arc<R>) -> Self
    where
        R: HierarchyView + AclStore + 'static,
    {
        let engine = DecisionEngine::new(Arc::new(matrix), repository.clone(), repository);
        Self::new(AclGateway::new(engine))
    }

    /// The mutation gateway.
    pub fn gateway(&self) -> &AclGateway {
        &self.gateway
    }

    /// The decision engine behind the gateway.
    pub fn engine(&self) -> &DecisionEngine {
        self.gateway.engine()
    }
}
