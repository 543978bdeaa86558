//! Common test utilities for the Fabryk ACL integration tests.

use std::sync::Arc;

use fabryk_acl::{
    AclGateway, Action, Caller, Decision, DecisionEngine, PrincipalSet, RoleMatrix,
};
use fabryk_core::ResourcePath;
use fabryk_storage::{MemoryRepository, RepositorySeed};

/// Superuser principal used throughout the suite.
pub const SUPERUSER: &str = "fedoraAdmin";

/// The shared scenario tree.
///
/// ```text
/// /                 (no ACL)
/// /a                EVERYONE: reader, alice: admin
/// /a/b              (no ACL)
/// /a/c              alice: reader
/// /a/d              tombstoned
/// /x/y              (no ACL anywhere above)
/// ```
pub const SCENARIO: &str = r#"{
    "resources": [
        { "path": "/a", "acl": { "EVERYONE": ["reader"], "alice": ["admin"] } },
        { "path": "/a/b" },
        { "path": "/a/c", "acl": { "alice": ["reader"] } },
        { "path": "/a/d", "state": "tombstoned" },
        { "path": "/x/y" }
    ]
}"#;

/// Repository plus the engine and gateway over it.
pub struct TestHarness {
    /// Backing repository
    pub repo: Arc<MemoryRepository>,
    /// Mutation gateway (owns the engine)
    pub gateway: AclGateway,
}

impl TestHarness {
    /// Harness over the shared scenario tree.
    pub fn new() -> Self {
        Self::from_seed(SCENARIO)
    }

    /// Harness over an arbitrary JSON seed.
    pub fn from_seed(seed: &str) -> Self {
        let repo = Arc::new(
            RepositorySeed::from_json_str(seed)
                .expect("seed parses")
                .into_repository()
                .expect("seed applies"),
        );
        let engine = DecisionEngine::new(Arc::new(RoleMatrix::basic()), repo.clone(), repo.clone());
        Self {
            repo,
            gateway: AclGateway::new(engine),
        }
    }

    /// The decision engine.
    pub fn engine(&self) -> &DecisionEngine {
        self.gateway.engine()
    }

    /// Shorthand for `engine().decide(..)`.
    pub fn decide(&self, caller: &Caller, raw_path: &str, action: Action) -> Decision {
        self.engine()
            .decide(caller, &path(raw_path), action)
            .expect("decision succeeds")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a path.
pub fn path(raw: &str) -> ResourcePath {
    ResourcePath::parse(raw).expect("valid path")
}

/// Ordinary caller for a user with groups.
pub fn user(name: &str, groups: &[&str]) -> Caller {
    Caller::ordinary(PrincipalSet::for_user(name).with_groups(groups.iter().copied()))
}

/// Anonymous caller.
pub fn anonymous() -> Caller {
    Caller::anonymous()
}

/// Superuser caller.
pub fn superuser() -> Caller {
    Caller::superuser(PrincipalSet::for_user(SUPERUSER))
}
