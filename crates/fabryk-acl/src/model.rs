//! Principals, roles, actions and access control lists.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name of the wildcard principal that matches every caller.
pub const EVERYONE: &str = "EVERYONE";

// ============================================================================
// Principals
// ============================================================================

/// An opaque caller identity or group name.
///
/// Names are stored trimmed, so `" bob "` and `"bob"` are the same principal
/// whether they come from an ACL payload or from a caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Creates a principal, rejecting empty or whitespace-only names.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = canonical_name(name.into());
        if name.is_empty() {
            return Err(Error::validation_field(
                "principal",
                "Principal names cannot be empty strings or whitespace",
            ));
        }
        Ok(Self(name))
    }

    /// The wildcard principal.
    pub fn everyone() -> Self {
        Self(EVERYONE.to_string())
    }

    /// Returns `true` for the wildcard principal.
    pub fn is_everyone(&self) -> bool {
        self.0 == EVERYONE
    }

    /// The principal name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Principal {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Principal> for String {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

fn canonical_name(name: String) -> String {
    let trimmed = name.trim();
    if trimmed.len() == name.len() {
        name
    } else {
        trimmed.to_string()
    }
}

/// The principals a request acts as: identity, groups, and always
/// [`EVERYONE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrincipalSet {
    principals: BTreeSet<Principal>,
}

impl PrincipalSet {
    /// A caller with no identity; holds only [`EVERYONE`].
    pub fn anonymous() -> Self {
        Self {
            principals: BTreeSet::from([Principal::everyone()]),
        }
    }

    /// An authenticated user. A blank name yields the anonymous set.
    pub fn for_user(name: &str) -> Self {
        let mut set = Self::anonymous();
        set.insert(name);
        set
    }

    /// Adds group memberships, skipping blank names.
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for group in groups {
            self.insert(group.as_ref());
        }
        self
    }

    /// Adds a principal by name. Returns `false` if the name is blank or
    /// already present.
    pub fn insert(&mut self, name: &str) -> bool {
        match Principal::new(name) {
            Ok(principal) => self.principals.insert(principal),
            Err(_) => false,
        }
    }

    /// Returns `true` if the set contains `principal`.
    pub fn contains(&self, principal: &Principal) -> bool {
        self.principals.contains(principal)
    }

    /// Iterates the principals in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Principal> {
        self.principals.iter()
    }

    /// Number of principals, [`EVERYONE`] included.
    pub fn len(&self) -> usize {
        self.principals.len()
    }

    /// Always `false`; the set holds at least [`EVERYONE`].
    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

impl Default for PrincipalSet {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for PrincipalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.principals.iter().map(Principal::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Classification supplied by authentication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalClass {
    /// Bypasses every ACL check.
    Superuser,
    /// Subject to ACL resolution.
    #[default]
    Ordinary,
}

/// Who is asking: their principal set and classification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Caller {
    /// Identity, groups and [`EVERYONE`]
    pub principals: PrincipalSet,
    /// Superuser or ordinary
    pub class: PrincipalClass,
}

impl Caller {
    /// An ordinary caller.
    pub fn ordinary(principals: PrincipalSet) -> Self {
        Self {
            principals,
            class: PrincipalClass::Ordinary,
        }
    }

    /// A superuser caller.
    pub fn superuser(principals: PrincipalSet) -> Self {
        Self {
            principals,
            class: PrincipalClass::Superuser,
        }
    }

    /// An anonymous ordinary caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns `true` for superusers.
    pub fn is_superuser(&self) -> bool {
        self.class == PrincipalClass::Superuser
    }
}

// ============================================================================
// Roles and actions
// ============================================================================

/// A named role from the configured role matrix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(pub(crate) String);

impl Role {
    /// Creates a role, rejecting empty or whitespace-only names. Surrounding
    /// whitespace is dropped.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = canonical_name(name.into());
        if name.is_empty() {
            return Err(Error::validation_field(
                "role",
                "Role names cannot be empty strings or whitespace",
            ));
        }
        Ok(Self(name))
    }

    /// The role name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Role {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

/// An operation a caller may attempt on a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    /// Read the resource and its ACL.
    Read,
    /// Create children under the resource.
    AddChildContent,
    /// Modify the resource's content or properties.
    UpdateContent,
    /// Create, replace or delete the resource's ACL.
    ManageAcl,
    /// Delete the resource.
    DeleteResource,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 5] = [
        Action::Read,
        Action::AddChildContent,
        Action::UpdateContent,
        Action::ManageAcl,
        Action::DeleteResource,
    ];

    /// Canonical SCREAMING_SNAKE_CASE name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "READ",
            Action::AddChildContent => "ADD_CHILD_CONTENT",
            Action::UpdateContent => "UPDATE_CONTENT",
            Action::ManageAcl => "MANAGE_ACL",
            Action::DeleteResource => "DELETE_RESOURCE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    /// Case-insensitive; `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| Error::validation_field("action", format!("Unknown action '{s}'")))
    }
}

impl TryFrom<String> for Action {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

// ============================================================================
// Access control lists
// ============================================================================

/// Unvalidated principal → roles payload, as exchanged on the wire.
pub type Assignments = BTreeMap<String, Vec<String>>;

/// Parse a JSON ACL payload (`{"principal": ["role", ...]}`).
///
/// Malformed JSON is reported as a validation error; the result still needs
/// [`Acl::try_from_assignments`].
pub fn parse_assignments(body: &[u8]) -> Result<Assignments> {
    serde_json::from_slice(body).map_err(|e| {
        Error::validation_field("body", format!("Malformed access roles payload: {e}"))
    })
}

/// A validated, non-empty mapping of principals to role sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Assignments", into = "Assignments")]
pub struct Acl {
    entries: BTreeMap<Principal, BTreeSet<Role>>,
}

impl Acl {
    /// Validate a raw payload.
    ///
    /// Rejects an empty map, a principal with no roles, a blank principal
    /// and a blank role. Names are trimmed; duplicate roles collapse and
    /// principals that differ only in surrounding whitespace are merged.
    pub fn try_from_assignments(assignments: Assignments) -> Result<Self> {
        if assignments.is_empty() {
            return Err(Error::validation(
                "Posted access roles must include role assignments",
            ));
        }

        let mut entries = BTreeMap::new();
        for (principal, roles) in assignments {
            if roles.is_empty() {
                return Err(Error::validation_field(
                    "roles",
                    "Assignments must include principal name and one or more roles",
                ));
            }
            let principal = Principal::new(principal)?;
            let roles = roles
                .into_iter()
                .map(Role::new)
                .collect::<Result<BTreeSet<_>>>()?;
            entries
                .entry(principal)
                .or_insert_with(BTreeSet::new)
                .extend(roles);
        }
        Ok(Self { entries })
    }

    /// Build an ACL from `(principal, roles)` pairs.
    pub fn from_entries<I, P, R, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut assignments = Assignments::new();
        for (principal, roles) in entries {
            assignments
                .entry(principal.into())
                .or_default()
                .extend(roles.into_iter().map(Into::into));
        }
        Self::try_from_assignments(assignments)
    }

    /// Roles assigned directly to `principal`.
    pub fn get(&self, principal: &Principal) -> Option<&BTreeSet<Role>> {
        self.entries.get(principal)
    }

    /// Union of roles assigned to any principal in `principals`.
    pub fn roles_for(&self, principals: &PrincipalSet) -> BTreeSet<Role> {
        principals
            .iter()
            .filter_map(|p| self.entries.get(p))
            .flatten()
            .cloned()
            .collect()
    }

    /// Every role named anywhere in the ACL.
    pub fn roles(&self) -> BTreeSet<&Role> {
        self.entries.values().flatten().collect()
    }

    /// Iterates entries in principal order.
    pub fn iter(&self) -> impl Iterator<Item = (&Principal, &BTreeSet<Role>)> {
        self.entries.iter()
    }

    /// Number of principals with assignments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a validated ACL.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert back to the wire form.
    pub fn to_assignments(&self) -> Assignments {
        self.entries
            .iter()
            .map(|(principal, roles)| {
                (
                    principal.to_string(),
                    roles.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}

impl TryFrom<Assignments> for Acl {
    type Error = Error;

    fn try_from(assignments: Assignments) -> Result<Self> {
        Self::try_from_assignments(assignments)
    }
}

impl From<Acl> for Assignments {
    fn from(acl: Acl) -> Self {
        acl.to_assignments()
    }
}

// ============================================================================
// Node state
// ============================================================================

/// Existence state of a resource node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// The node exists.
    #[default]
    Live,
    /// The node was deleted; a tombstone marks where it was.
    Tombstoned,
    /// Nothing exists at this path.
    Absent,
}

impl NodeState {
    /// Returns `true` for live nodes.
    pub fn is_live(&self) -> bool {
        *self == NodeState::Live
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeState::Live => "live",
            NodeState::Tombstoned => "tombstoned",
            NodeState::Absent => "absent",
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
