//! Command implementations.
//!
//! Each command returns its result instead of printing it so `main` owns the
//! output format.

use std::path::Path;
use std::sync::Arc;

use fabryk_acl::{
    Acl, Action, Caller, DecisionEngine, PrincipalClass, PrincipalSet, RoleMatrix, Verdict,
};
use fabryk_api::{AppState, Server, ServerConfig};
use fabryk_core::ResourcePath;
use fabryk_storage::{MemoryRepository, RepositorySeed};

use crate::config::AclConfig;
use crate::Result;

// ============================================================================
// check
// ============================================================================

/// Caller and request for `check`.
#[derive(Clone, Debug)]
pub struct CheckRequest {
    /// User principal; anonymous when `None`
    pub principal: Option<String>,
    /// Group principals
    pub groups: Vec<String>,
    /// Superuser classification
    pub superuser: bool,
    /// Action name as typed
    pub action: String,
    /// Resource path as typed
    pub path: String,
}

impl CheckRequest {
    fn caller(&self) -> Caller {
        let principals = match self.principal.as_deref() {
            Some(name) => PrincipalSet::for_user(name),
            None => PrincipalSet::anonymous(),
        }
        .with_groups(self.groups.iter().map(String::as_str));
        let class = if self.superuser {
            PrincipalClass::Superuser
        } else {
            PrincipalClass::Ordinary
        };
        Caller { principals, class }
    }
}

/// Evaluate one decision against the repository described by `seed`.
pub fn check(matrix: RoleMatrix, seed: impl AsRef<Path>, request: &CheckRequest) -> Result<Verdict> {
    let repo = Arc::new(RepositorySeed::from_path(seed)?.into_repository()?);
    let engine = DecisionEngine::new(Arc::new(matrix), repo.clone(), repo);

    let action: Action = request.action.parse()?;
    let path = ResourcePath::parse(&request.path)?;
    let caller = request.caller();
    Ok(engine.evaluate(&caller, &path, action)?)
}

// ============================================================================
// validate
// ============================================================================

/// Outcome of validating an ACL payload.
#[derive(Clone, Debug)]
pub struct ValidationReport {
    /// The parsed ACL
    pub acl: Acl,
    /// Roles named in the ACL that the matrix does not define
    pub unknown_roles: Vec<String>,
}

/// Parse and validate a JSON ACL payload file.
pub fn validate(matrix: &RoleMatrix, file: impl AsRef<Path>) -> Result<ValidationReport> {
    let file = file.as_ref();
    let body = std::fs::read(file).map_err(|e| fabryk_core::Error::io_with_path(e, file))?;
    let assignments = fabryk_acl::model::parse_assignments(&body)?;
    let acl = Acl::try_from_assignments(assignments)?;
    let unknown_roles = matrix
        .unknown_roles(&acl)
        .into_iter()
        .map(ToString::to_string)
        .collect();
    Ok(ValidationReport { acl, unknown_roles })
}

// ============================================================================
// roles
// ============================================================================

/// One line per role: `name: ACTION, ACTION`.
pub fn render_roles(matrix: &RoleMatrix) -> String {
    matrix
        .iter()
        .map(|(role, actions)| {
            let actions: Vec<&str> = actions.iter().map(Action::as_str).collect();
            format!("{role}: {}", actions.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// serve
// ============================================================================

/// Overrides for `serve` taken from the command line.
#[derive(Clone, Debug, Default)]
pub struct ServeOverrides {
    /// Seed file
    pub seed: Option<String>,
    /// Interface to bind
    pub host: Option<String>,
    /// Port to bind
    pub port: Option<u16>,
}

/// Build the server described by `config` and `overrides`.
pub fn build_server(config: &AclConfig, overrides: ServeOverrides) -> Result<Server> {
    let repo = match overrides.seed.or_else(|| config.server.seed.clone()) {
        Some(seed) => {
            let seed_path = fabryk_core::expand_tilde(&seed);
            tracing::info!(seed = %seed_path.display(), "loading repository seed");
            RepositorySeed::from_path(&seed_path)?.into_repository()?
        }
        None => MemoryRepository::new(),
    };

    let mut listen: ServerConfig = config.listen();
    if let Some(host) = overrides.host {
        listen.host = host;
    }
    if let Some(port) = overrides.port {
        listen.port = port;
    }

    let state = AppState::from_repository(config.role_matrix()?, Arc::new(repo));
    Ok(Server::new(listen, state, config.identity()))
}

/// Run the HTTP server until interrupted.
pub async fn serve(config: &AclConfig, overrides: ServeOverrides) -> Result<()> {
    let server = build_server(config, overrides)?;
    server.run().await?;
    Ok(())
}
