//! The role matrix: which actions each role authorizes.
//!
//! The matrix is loaded once from configuration and is immutable afterwards;
//! it is shared behind an `Arc` and passed to the engine explicitly.
//!
//! ```toml
//! [roles]
//! reader = ["READ"]
//! writer = ["READ", "ADD_CHILD_CONTENT", "UPDATE_CONTENT", "DELETE_RESOURCE"]
//! admin = ["READ", "ADD_CHILD_CONTENT", "UPDATE_CONTENT", "MANAGE_ACL", "DELETE_RESOURCE"]
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Acl, Action, Role};
use crate::{Error, Result};

/// Role matrix as it appears in configuration: role name → actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleMatrixConfig(pub BTreeMap<String, Vec<Action>>);

impl Default for RoleMatrixConfig {
    fn default() -> Self {
        RoleMatrix::basic().to_config()
    }
}

/// Immutable role → action-set mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleMatrix {
    roles: BTreeMap<Role, BTreeSet<Action>>,
}

impl RoleMatrix {
    /// Read-only role.
    pub const READER: &'static str = "reader";
    /// Content-editing role.
    pub const WRITER: &'static str = "writer";
    /// Full control, including ACL management.
    pub const ADMIN: &'static str = "admin";

    /// The built-in basic roles: `reader`, `writer`, `admin`.
    pub fn basic() -> Self {
        let reader = BTreeSet::from([Action::Read]);
        let writer = BTreeSet::from([
            Action::Read,
            Action::AddChildContent,
            Action::UpdateContent,
            Action::DeleteResource,
        ]);
        let admin: BTreeSet<Action> = Action::ALL.into_iter().collect();

        let roles = [
            (Self::READER, reader),
            (Self::WRITER, writer),
            (Self::ADMIN, admin),
        ]
        .into_iter()
        .map(|(name, actions)| (Role(name.to_string()), actions))
        .collect();
        Self { roles }
    }

    /// Build a matrix from configuration.
    ///
    /// Rejects an empty table and blank role names. A role may map to no
    /// actions. Names are trimmed like ACL roles; keys that collide after
    /// trimming share the union of their actions.
    pub fn from_config(config: &RoleMatrixConfig) -> Result<Self> {
        if config.0.is_empty() {
            return Err(Error::validation_field(
                "roles",
                "The role matrix must define at least one role",
            ));
        }
        let mut roles = BTreeMap::new();
        for (name, actions) in &config.0 {
            let role = Role::new(name.as_str())?;
            roles
                .entry(role)
                .or_insert_with(BTreeSet::new)
                .extend(actions.iter().copied());
        }
        Ok(Self { roles })
    }

    /// Render back to configuration form.
    pub fn to_config(&self) -> RoleMatrixConfig {
        RoleMatrixConfig(
            self.roles
                .iter()
                .map(|(role, actions)| (role.to_string(), actions.iter().copied().collect()))
                .collect(),
        )
    }

    /// Actions granted by `role`, or `None` for an unknown role.
    pub fn actions_for(&self, role: &Role) -> Option<&BTreeSet<Action>> {
        self.roles.get(role)
    }

    /// Returns `true` if `role` is defined.
    pub fn contains_role(&self, role: &Role) -> bool {
        self.roles.contains_key(role)
    }

    /// Union of actions granted by `roles`. Unknown roles contribute nothing.
    pub fn actions_for_roles<'a, I>(&self, roles: I) -> BTreeSet<Action>
    where
        I: IntoIterator<Item = &'a Role>,
    {
        roles
            .into_iter()
            .filter_map(|role| self.roles.get(role))
            .flatten()
            .copied()
            .collect()
    }

    /// Returns `true` if any of `roles` grants `action`.
    pub fn authorizes<'a, I>(&self, roles: I, action: Action) -> bool
    where
        I: IntoIterator<Item = &'a Role>,
    {
        roles
            .into_iter()
            .filter_map(|role| self.roles.get(role))
            .any(|actions| actions.contains(&action))
    }

    /// Roles named in `acl` that this matrix does not define.
    pub fn unknown_roles<'a>(&self, acl: &'a Acl) -> Vec<&'a Role> {
        acl.roles()
            .into_iter()
            .filter(|role| !self.contains_role(role))
            .collect()
    }

    /// Iterates roles and their actions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Role, &BTreeSet<Action>)> {
        self.roles.iter()
    }
}

impl Default for RoleMatrix {
    fn default() -> Self {
        Self::basic()
    }
}
