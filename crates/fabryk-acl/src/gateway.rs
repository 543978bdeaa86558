//! Validated create/replace/delete/read of a node's direct ACL.
//!
//! Every operation goes through the [`DecisionEngine`]. The only shortcut is
//! the root prohibition, which is checked before anything else so that
//! changing root ACLs fails the same way for every caller and payload.

use fabryk_core::ResourcePath;

use crate::enforcement::{DecisionEngine, Verdict};
use crate::model::{Acl, Action, Assignments, Caller, NodeState, parse_assignments};
use crate::{Error, Result};

/// Whether `set_acl` attached a new ACL or replaced one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// No ACL was attached before.
    Created,
    /// A previous ACL was replaced wholesale.
    Replaced,
}

/// Mutation gateway for directly attached ACLs.
#[derive(Clone, Debug)]
pub struct AclGateway {
    engine: DecisionEngine,
}

impl AclGateway {
    /// Create a gateway that authorizes through `engine`.
    pub fn new(engine: DecisionEngine) -> Self {
        Self { engine }
    }

    /// The engine used for authorization.
    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Attach `assignments` to `path`, replacing any previous ACL.
    pub fn set_acl(
        &self,
        caller: &Caller,
        path: &ResourcePath,
        assignments: Assignments,
    ) -> Result<SetOutcome> {
        reject_root(path)?;
        let acl = Acl::try_from_assignments(assignments)?;
        self.check(caller, path, Action::ManageAcl)?;

        let unknown = self.engine.matrix().unknown_roles(&acl);
        if !unknown.is_empty() {
            let names: Vec<&str> = unknown.iter().map(|role| role.as_str()).collect();
            log::warn!(
                "ACL on {path} names undefined roles [{}]; they grant nothing",
                names.join(", ")
            );
        }

        let previous = self.engine.store().put_acl(path, acl)?;
        let outcome = if previous.is_some() {
            SetOutcome::Replaced
        } else {
            SetOutcome::Created
        };
        log::debug!("{outcome:?} ACL on {path} for {}", caller.principals);
        Ok(outcome)
    }

    /// Like [`set_acl`](Self::set_acl) for a raw JSON body.
    ///
    /// The root prohibition is checked before the body is parsed.
    pub fn set_acl_json(
        &self,
        caller: &Caller,
        path: &ResourcePath,
        body: &[u8],
    ) -> Result<SetOutcome> {
        reject_root(path)?;
        self.set_acl(caller, path, parse_assignments(body)?)
    }

    /// Remove the ACL attached to `path` and return it.
    pub fn delete_acl(&self, caller: &Caller, path: &ResourcePath) -> Result<Acl> {
        reject_root(path)?;
        self.check(caller, path, Action::ManageAcl)?;

        let removed = self
            .engine
            .store()
            .remove_acl(path)?
            .ok_or_else(|| Error::AclNotFound { path: path.clone() })?;
        log::debug!("removed ACL on {path} for {}", caller.principals);
        Ok(removed)
    }

    /// Read the ACL for `path`.
    ///
    /// With `effective` false only a directly attached ACL is returned;
    /// otherwise the governing ACL from the nearest ancestor.
    pub fn get_acl(
        &self,
        caller: &Caller,
        path: &ResourcePath,
        effective: bool,
    ) -> Result<Option<Acl>> {
        self.check(caller, path, Action::Read)?;
        if effective {
            Ok(self.engine.resolve(path)?.map(|resolution| resolution.acl))
        } else {
            self.engine.store().get_acl(path)
        }
    }

    /// Authorize `action` and, for allowed superusers, confirm the node
    /// exists.
    ///
    /// A deny is [`Error::Forbidden`]. A superuser addressing a tombstone
    /// gets [`Error::ResourceGone`], and one addressing nothing gets
    /// [`Error::ResourceNotFound`].
    pub fn check(&self, caller: &Caller, path: &ResourcePath, action: Action) -> Result<Verdict> {
        let verdict = self.engine.authorize(caller, path, action)?;
        if caller.is_superuser() {
            match self.engine.hierarchy().state_of(path)? {
                NodeState::Live => {}
                NodeState::Tombstoned => return Err(Error::ResourceGone { path: path.clone() }),
                NodeState::Absent => {
                    return Err(Error::ResourceNotFound { path: path.clone() });
                }
            }
        }
        Ok(verdict)
    }
}

fn reject_root(path: &ResourcePath) -> Result<()> {
    if path.is_root() {
        return Err(Error::RootProhibited);
    }
    Ok(())
}
