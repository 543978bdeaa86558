//! Repository seed fixtures.
//!
//! A seed lists resources with their state and optional ACL:
//!
//! ```json
//! {
//!   "resources": [
//!     { "path": "/a", "acl": { "EVERYONE": ["reader"] } },
//!     { "path": "/a/d", "state": "tombstoned" }
//!   ]
//! }
//! ```
//!
//! The same shape is accepted as TOML (`[[resources]]`). Missing ancestors
//! are created live. Seeding writes ACLs straight into the store, so it is
//! the way to place an ACL on the root.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fabryk_acl::{Acl, AclStore, Assignments, NodeState};
use fabryk_core::ResourcePath;

use crate::memory::MemoryRepository;
use crate::{Error, Result};

/// One resource in a seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResource {
    /// Resource path
    pub path: ResourcePath,
    /// Existence state; defaults to live
    #[serde(default)]
    pub state: NodeState,
    /// Directly attached ACL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<Assignments>,
}

/// A list of resources used to populate a [`MemoryRepository`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySeed {
    /// Resources in any order
    #[serde(default)]
    pub resources: Vec<SeedResource>,
}

impl RepositorySeed {
    /// Parse a JSON seed.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML seed.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a seed file; `.toml` files are TOML, anything else JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| fabryk_core::Error::io_with_path(e, path))?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Check the seed for contradictions without touching a repository.
    ///
    /// Paths must be unique, the root must be live, only live resources may
    /// carry an ACL, ACLs must be valid, and nothing may sit below a
    /// tombstoned or absent resource.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for resource in &self.resources {
            if !seen.insert(&resource.path) {
                return Err(Error::seed(format!("{} is listed twice", resource.path)));
            }
            if resource.path.is_root() && !resource.state.is_live() {
                return Err(Error::seed("the root must be live"));
            }
            if let Some(assignments) = &resource.acl {
                if !resource.state.is_live() {
                    return Err(Error::seed(format!(
                        "{} is {} and cannot carry an ACL",
                        resource.path, resource.state
                    )));
                }
                validated_acl(&resource.path, assignments)?;
            }
        }

        for hidden in self.resources.iter().filter(|r| !r.state.is_live()) {
            if let Some(below) = self
                .resources
                .iter()
                .find(|r| r.path.is_descendant_of(&hidden.path))
            {
                return Err(Error::seed(format!(
                    "{} lies below {} resource {}",
                    below.path, hidden.state, hidden.path
                )));
            }
        }
        Ok(())
    }

    /// Populate `repo`.
    ///
    /// Nodes are created first, then ACLs attached, then tombstones laid
    /// down. Absent entries only reserve their path as empty.
    pub fn apply(&self, repo: &MemoryRepository) -> Result<()> {
        self.validate()?;

        for resource in self.resources.iter().filter(|r| r.state != NodeState::Absent) {
            repo.create_all(&resource.path)?;
        }
        for resource in &self.resources {
            if let Some(assignments) = &resource.acl {
                repo.put_acl(&resource.path, validated_acl(&resource.path, assignments)?)?;
            }
        }
        for resource in self
            .resources
            .iter()
            .filter(|r| r.state == NodeState::Tombstoned)
        {
            repo.tombstone(&resource.path)?;
        }

        log::info!("seeded {} resources", self.resources.len());
        Ok(())
    }

    /// Build a fresh repository from this seed.
    pub fn into_repository(self) -> Result<MemoryRepository> {
        let repo = MemoryRepository::new();
        self.apply(&repo)?;
        Ok(repo)
    }
}

fn validated_acl(path: &ResourcePath, assignments: &Assignments) -> Result<Acl> {
    Acl::try_from_assignments(assignments.clone())
        .map_err(|e| Error::seed(format!("invalid ACL on {path}: {e}")))
}
