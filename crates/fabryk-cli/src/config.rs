//! `fabryk-acl` configuration.
//!
//! ```toml
//! superusers = ["fedoraAdmin"]
//!
//! [roles]
//! reader = ["READ"]
//! admin = ["READ", "ADD_CHILD_CONTENT", "UPDATE_CONTENT", "MANAGE_ACL", "DELETE_RESOURCE"]
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! seed = "~/fabryk/seed.json"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};

use fabryk_acl::{RoleMatrix, RoleMatrixConfig};
use fabryk_api::{IdentityConfig, ServerConfig};
use fabryk_core::{ConfigManager, Error, Result};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Principals treated as superusers
    pub superusers: Vec<String>,
    /// Role name → actions
    pub roles: RoleMatrixConfig,
    /// HTTP listener and repository seed
    pub server: ServerSection,
    /// Log filter
    pub logging: LoggingSection,
}

/// `[server]` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Repository seed loaded at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        let listen = ServerConfig::default();
        Self {
            host: listen.host,
            port: listen.port,
            seed: None,
        }
    }
}

/// `[logging]` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AclConfig {
    /// Build the role matrix.
    pub fn role_matrix(&self) -> fabryk_acl::Result<RoleMatrix> {
        RoleMatrix::from_config(&self.roles)
    }

    /// Superuser classification for the HTTP binding.
    pub fn identity(&self) -> IdentityConfig {
        IdentityConfig::new(self.superusers.iter().map(|s| s.trim()))
    }

    /// Listener settings.
    pub fn listen(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }
}

impl ConfigManager for AclConfig {
    fn project_name() -> &'static str {
        "fabryk-acl"
    }

    fn validate(&self) -> Result<()> {
        if self.superusers.iter().any(|name| name.trim().is_empty()) {
            return Err(Error::config("superusers cannot contain blank names"));
        }
        self.role_matrix()
            .map_err(|e| Error::config(format!("invalid [roles]: {e}")))?;
        if self.logging.level.trim().is_empty() {
            return Err(Error::config("logging.level cannot be empty"));
        }
        Ok(())
    }
}
