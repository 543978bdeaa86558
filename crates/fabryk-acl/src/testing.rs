//! In-crate repository double for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use fabryk_core::ResourcePath;

use crate::Result;
use crate::hierarchy::HierarchyView;
use crate::model::{Acl, NodeState};
use crate::store::AclStore;

pub(crate) fn path(raw: &str) -> ResourcePath {
    ResourcePath::parse(raw).unwrap()
}

pub(crate) fn acl(principal: &str, roles: &[&str]) -> Acl {
    Acl::from_entries([(principal, roles.iter().copied())]).unwrap()
}

/// Nodes default to live; explicit entries override the state.
#[derive(Default)]
pub(crate) struct FakeRepository {
    states: Mutex<BTreeMap<ResourcePath, NodeState>>,
    acls: Mutex<BTreeMap<ResourcePath, Acl>>,
}

impl FakeRepository {
    pub(crate) fn with_acl(self, raw: &str, value: Acl) -> Self {
        self.acls.lock().unwrap().insert(path(raw), value);
        self
    }

    pub(crate) fn with_state(self, raw: &str, state: NodeState) -> Self {
        self.states.lock().unwrap().insert(path(raw), state);
        self
    }
}

impl HierarchyView for FakeRepository {
    fn state_of(&self, path: &ResourcePath) -> Result<NodeState> {
        Ok(self
            .states
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(NodeState::Live))
    }
}

impl AclStore for FakeRepository {
    fn get_acl(&self, path: &ResourcePath) -> Result<Option<Acl>> {
        Ok(self.acls.lock().unwrap().get(path).cloned())
    }

    fn put_acl(&self, path: &ResourcePath, acl: Acl) -> Result<Option<Acl>> {
        Ok(self.acls.lock().unwrap().insert(path.clone(), acl))
    }

    fn remove_acl(&self, path: &ResourcePath) -> Result<Option<Acl>> {
        Ok(self.acls.lock().unwrap().remove(path))
    }
}

/// A hierarchy whose `parent_of` never gets shallower.
pub(crate) struct CyclicHierarchy;

impl HierarchyView for CyclicHierarchy {
    fn parent_of(&self, path: &ResourcePath) -> Result<Option<ResourcePath>> {
        Ok(Some(path.clone()))
    }

    fn state_of(&self, _path: &ResourcePath) -> Result<NodeState> {
        Ok(NodeState::Live)
    }
}
