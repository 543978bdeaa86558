//! The decision engine.
//!
//! [`DecisionEngine::evaluate`] is the single entry point. Its guard clauses
//! run in a fixed order:
//!
//! 1. superusers are allowed unconditionally;
//! 2. ordinary callers are denied on tombstoned or absent resources;
//! 3. with no governing ACL the caller is denied;
//! 4. otherwise the caller's roles in the governing ACL are mapped through
//!    the role matrix and the action must be in the resulting set.
//!
//! Ordinary callers are judged against one [`AclStore::snapshot`] of the
//! resource state and its governing ACL. Evaluation mutates nothing.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use fabryk_core::ResourcePath;

use crate::hierarchy::HierarchyView;
use crate::model::{Acl, Action, Caller, NodeState, PrincipalSet, Role};
use crate::policy::RoleMatrix;
use crate::resolver::{Resolution, Resolver};
use crate::store::AclStore;
use crate::{Error, Result};

// ============================================================================
// Verdicts
// ============================================================================

/// Outcome of a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// The action is permitted.
    Allow,
    /// The action is not permitted.
    Deny,
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        *self == Decision::Allow
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Allow => "allow",
            Decision::Deny => "deny",
        })
    }
}

/// Why a decision came out the way it did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    /// The caller is a superuser.
    SuperuserBypass,
    /// The resource is not live and the caller is ordinary.
    Hidden {
        /// State of the resource
        state: NodeState,
    },
    /// No ACL exists on the resource or any ancestor.
    NoGoverningAcl,
    /// The governing ACL grants the action through these roles.
    Granted {
        /// Node carrying the governing ACL
        governing: ResourcePath,
        /// Caller's roles that authorize the action
        roles: BTreeSet<Role>,
    },
    /// The governing ACL does not grant the action to the caller.
    NotGranted {
        /// Node carrying the governing ACL
        governing: ResourcePath,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::SuperuserBypass => write!(f, "superuser bypass"),
            Reason::Hidden { state } => write!(f, "resource is {state}"),
            Reason::NoGoverningAcl => write!(f, "no governing ACL"),
            Reason::Granted { governing, roles } => {
                let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
                write!(f, "granted by [{}] in ACL on {governing}", names.join(", "))
            }
            Reason::NotGranted { governing } => {
                write!(f, "not granted by ACL on {governing}")
            }
        }
    }
}

/// A decision together with its reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Allow or deny
    pub decision: Decision,
    /// Why
    pub reason: Reason,
}

impl Verdict {
    fn allow(reason: Reason) -> Self {
        Self {
            decision: Decision::Allow,
            reason,
        }
    }

    fn deny(reason: Reason) -> Self {
        Self {
            decision: Decision::Deny,
            reason,
        }
    }

    /// Returns `true` if the decision is [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        self.decision.is_allowed()
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Decides whether a caller may perform an action on a resource.
///
/// Cloning is cheap; all collaborators are shared behind `Arc`s.
#[derive(Clone)]
pub struct DecisionEngine {
    matrix: Arc<RoleMatrix>,
    hierarchy: Arc<dyn HierarchyView>,
    store: Arc<dyn AclStore>,
}

impl DecisionEngine {
    /// Create an engine over a role matrix, hierarchy and ACL store.
    pub fn new(
        matrix: Arc<RoleMatrix>,
        hierarchy: Arc<dyn HierarchyView>,
        store: Arc<dyn AclStore>,
    ) -> Self {
        Self {
            matrix,
            hierarchy,
            store,
        }
    }

    /// The role matrix in use.
    pub fn matrix(&self) -> &RoleMatrix {
        &self.matrix
    }

    /// The hierarchy view in use.
    pub fn hierarchy(&self) -> &dyn HierarchyView {
        self.hierarchy.as_ref()
    }

    /// The ACL store in use.
    pub fn store(&self) -> &dyn AclStore {
        self.store.as_ref()
    }

    /// Find the ACL governing `path`.
    pub fn resolve(&self, path: &ResourcePath) -> Result<Option<Resolution>> {
        Resolver::new(self.hierarchy(), self.store()).resolve(path)
    }

    /// Actions `principals` hold under `acl`.
    pub fn effective_actions(&self, principals: &PrincipalSet, acl: &Acl) -> BTreeSet<Action> {
        self.matrix.actions_for_roles(&acl.roles_for(principals))
    }

    /// Decide and explain.
    pub fn evaluate(&self, caller: &Caller, path: &ResourcePath, action: Action) -> Result<Verdict> {
        let verdict = self.evaluate_inner(caller, path, action)?;
        log::debug!(
            "{} {action} on {path} for {}: {}",
            verdict.decision,
            caller.principals,
            verdict.reason
        );
        Ok(verdict)
    }

    fn evaluate_inner(
        &self,
        caller: &Caller,
        path: &ResourcePath,
        action: Action,
    ) -> Result<Verdict> {
        if caller.is_superuser() {
            return Ok(Verdict::allow(Reason::SuperuserBypass));
        }

        let snapshot = self.store.snapshot(self.hierarchy(), path)?;
        if !snapshot.state.is_live() {
            return Ok(Verdict::deny(Reason::Hidden {
                state: snapshot.state,
            }));
        }

        let Some(resolution) = snapshot.resolution else {
            return Ok(Verdict::deny(Reason::NoGoverningAcl));
        };

        let granting: BTreeSet<Role> = resolution
            .acl
            .roles_for(&caller.principals)
            .into_iter()
            .filter(|role| self.matrix.authorizes([role], action))
            .collect();

        if granting.is_empty() {
            Ok(Verdict::deny(Reason::NotGranted {
                governing: resolution.governing,
            }))
        } else {
            Ok(Verdict::allow(Reason::Granted {
                governing: resolution.governing,
                roles: granting,
            }))
        }
    }

    /// Decide whether `caller` may perform `action` on `path`.
    pub fn decide(&self, caller: &Caller, path: &ResourcePath, action: Action) -> Result<Decision> {
        Ok(self.evaluate(caller, path, action)?.decision)
    }

    /// Like [`evaluate`](Self::evaluate), but a deny becomes
    /// [`Error::Forbidden`].
    pub fn authorize(&self, caller: &Caller, path: &ResourcePath, action: Action) -> Result<Verdict> {
        let verdict = self.evaluate(caller, path, action)?;
        if verdict.is_allowed() {
            Ok(verdict)
        } else {
            Err(Error::forbidden(path, action))
        }
    }
}

impl fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("matrix", &self.matrix)
            .finish_non_exhaustive()
    }
}
