//! Nearest-ACL-wins resolution.
//!
//! Starting at the target resource, the resolver walks towards the root and
//! stops at the first node carrying a direct ACL. That ACL governs the target
//! in full: ACLs further up are never consulted or merged.

use serde::Serialize;

use fabryk_core::ResourcePath;

use crate::hierarchy::HierarchyView;
use crate::model::{Acl, NodeState};
use crate::store::AclStore;
use crate::{Error, Result};

/// The ACL governing a resource and where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Node carrying the governing ACL
    pub governing: ResourcePath,
    /// The governing ACL
    pub acl: Acl,
    /// Steps walked from the target (0 when the target carries it)
    pub distance: usize,
}

/// Existence state of a resource and its governing ACL, read together.
///
/// `resolution` is only computed for live resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// State of the resource
    pub state: NodeState,
    /// Governing ACL, if the resource is live and one exists
    pub resolution: Option<Resolution>,
}

/// Walks the ancestor chain using only `parent_of` and direct ACL lookups.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    hierarchy: &'a dyn HierarchyView,
    store: &'a dyn AclStore,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a hierarchy and an ACL store.
    pub fn new(hierarchy: &'a dyn HierarchyView, store: &'a dyn AclStore) -> Self {
        Self { hierarchy, store }
    }

    /// Find the ACL governing `path`.
    ///
    /// Returns `Ok(None)` when neither `path` nor any ancestor (root
    /// included) carries an ACL.
    pub fn resolve(&self, path: &ResourcePath) -> Result<Option<Resolution>> {
        resolve_with(self.hierarchy, path, |node| self.store.get_acl(node))
    }
}

/// Nearest-ACL-wins walk over `hierarchy`, reading direct ACLs through
/// `direct_acl`.
///
/// Stores that answer [`AclStore::snapshot`] from one lock drive the walk
/// with a lookup into their locked state.
pub fn resolve_with<F>(
    hierarchy: &dyn HierarchyView,
    path: &ResourcePath,
    mut direct_acl: F,
) -> Result<Option<Resolution>>
where
    F: FnMut(&ResourcePath) -> Result<Option<Acl>>,
{
    let mut current = path.clone();
    let mut distance = 0;

    loop {
        if let Some(acl) = direct_acl(&current)? {
            log::debug!("{path} governed by ACL on {current} (distance {distance})");
            return Ok(Some(Resolution {
                governing: current,
                acl,
                distance,
            }));
        }

        match hierarchy.parent_of(&current)? {
            Some(parent) if parent.depth() < current.depth() => {
                current = parent;
                distance += 1;
            }
            Some(parent) => {
                return Err(Error::store(format!(
                    "hierarchy reported {parent} as the parent of {current}"
                )));
            }
            None => {
                log::debug!("no governing ACL for {path}");
                return Ok(None);
            }
        }
    }
}
