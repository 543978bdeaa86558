//! In-memory repository.
//!
//! One `RwLock` guards the whole node table. Every trait call takes the lock
//! exactly once, so readers observe an ACL either before or after a
//! replace/remove and never in between. The root node always exists.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use fabryk_acl::{Acl, AclStore, HierarchyView, NodeState, Snapshot, resolve_with};
use fabryk_core::ResourcePath;

use crate::{Error, Result};

#[derive(Clone, Debug)]
struct NodeRecord {
    state: NodeState,
    acl: Option<Acl>,
}

impl NodeRecord {
    fn live() -> Self {
        Self {
            state: NodeState::Live,
            acl: None,
        }
    }
}

type NodeTable = BTreeMap<ResourcePath, NodeRecord>;

/// Thread-safe in-memory node tree with directly attached ACLs.
#[derive(Debug)]
pub struct MemoryRepository {
    nodes: RwLock<NodeTable>,
}

impl MemoryRepository {
    /// A repository holding only the root.
    pub fn new() -> Self {
        let mut nodes = NodeTable::new();
        nodes.insert(ResourcePath::root(), NodeRecord::live());
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    fn read(&self) -> fabryk_acl::Result<RwLockReadGuard<'_, NodeTable>> {
        self.nodes
            .read()
            .map_err(|_| fabryk_acl::Error::store("repository lock poisoned"))
    }

    fn write(&self) -> fabryk_acl::Result<RwLockWriteGuard<'_, NodeTable>> {
        self.nodes
            .write()
            .map_err(|_| fabryk_acl::Error::store("repository lock poisoned"))
    }

    /// Create a live node. Its parent must be live.
    pub fn create(&self, path: &ResourcePath) -> Result<()> {
        let mut nodes = self.write()?;
        create_in(&mut nodes, path)?;
        log::debug!("created {path}");
        Ok(())
    }

    /// Create a live node and any missing ancestors.
    ///
    /// Existing live nodes on the way are kept; a tombstone on the way is an
    /// error.
    pub fn create_all(&self, path: &ResourcePath) -> Result<()> {
        let mut nodes = self.write()?;
        let mut chain: Vec<ResourcePath> = path.ancestors().collect();
        chain.reverse();
        for node in chain {
            match nodes.get(&node).map(|record| record.state) {
                Some(NodeState::Live) => {}
                Some(_) => return Err(Error::lifecycle(&node, "a tombstone occupies this path")),
                None => create_in(&mut nodes, &node)?,
            }
        }
        Ok(())
    }

    /// Delete a live node, leaving a tombstone.
    ///
    /// The node's ACL is removed, and every descendant is destroyed together
    /// with its ACL, so descendants become absent.
    pub fn tombstone(&self, path: &ResourcePath) -> Result<usize> {
        if path.is_root() {
            return Err(Error::lifecycle(path, "the root cannot be deleted"));
        }
        let mut nodes = self.write()?;
        let record = nodes
            .get_mut(path)
            .filter(|record| record.state.is_live())
            .ok_or_else(|| Error::lifecycle(path, "no live resource at this path"))?;
        record.state = NodeState::Tombstoned;
        record.acl = None;

        let removed = remove_descendants(&mut nodes, path);
        log::debug!("tombstoned {path}, removed {removed} descendants");
        Ok(removed)
    }

    /// Remove a tombstone so the path becomes absent.
    pub fn purge(&self, path: &ResourcePath) -> Result<()> {
        let mut nodes = self.write()?;
        match nodes.get(path).map(|record| record.state) {
            Some(NodeState::Tombstoned) => {
                nodes.remove(path);
                remove_descendants(&mut nodes, path);
                log::debug!("purged {path}");
                Ok(())
            }
            Some(_) => Err(Error::lifecycle(path, "only tombstones can be purged")),
            None => Err(Error::lifecycle(path, "nothing to purge")),
        }
    }

    /// Existence state of `path`.
    pub fn state(&self, path: &ResourcePath) -> Result<NodeState> {
        Ok(self.state_of(path)?)
    }

    /// Paths of every recorded node (live or tombstoned), root first.
    pub fn paths(&self) -> Result<Vec<ResourcePath>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    /// Number of recorded nodes, root and tombstones included.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Always `false`; the root is always present.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn create_in(nodes: &mut NodeTable, path: &ResourcePath) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Err(Error::lifecycle(path, "the root always exists"));
    };
    match nodes.get(path).map(|record| record.state) {
        Some(NodeState::Live) => return Err(Error::lifecycle(path, "resource already exists")),
        Some(_) => {
            return Err(Error::lifecycle(path, "a tombstone occupies this path"));
        }
        None => {}
    }
    if !nodes.get(&parent).is_some_and(|record| record.state.is_live()) {
        return Err(Error::lifecycle(
            path,
            format!("parent {parent} is not a live resource"),
        ));
    }
    nodes.insert(path.clone(), NodeRecord::live());
    Ok(())
}

fn remove_descendants(nodes: &mut NodeTable, path: &ResourcePath) -> usize {
    let doomed: Vec<ResourcePath> = nodes
        .range((Bound::Excluded(path.clone()), Bound::Unbounded))
        .take_while(|(candidate, _)| path.is_ancestor_of(candidate))
        .map(|(candidate, _)| candidate.clone())
        .collect();
    for candidate in &doomed {
        nodes.remove(candidate);
    }
    doomed.len()
}

impl HierarchyView for MemoryRepository {
    fn state_of(&self, path: &ResourcePath) -> fabryk_acl::Result<NodeState> {
        Ok(self
            .read()?
            .get(path)
            .map_or(NodeState::Absent, |record| record.state))
    }
}

impl AclStore for MemoryRepository {
    fn get_acl(&self, path: &ResourcePath) -> fabryk_acl::Result<Option<Acl>> {
        Ok(self.read()?.get(path).and_then(|record| record.acl.clone()))
    }

    fn put_acl(&self, path: &ResourcePath, acl: Acl) -> fabryk_acl::Result<Option<Acl>> {
        let mut nodes = self.write()?;
        match nodes.get_mut(path) {
            Some(record) if record.state.is_live() => Ok(record.acl.replace(acl)),
            Some(_) => Err(fabryk_acl::Error::ResourceGone { path: path.clone() }),
            None => Err(fabryk_acl::Error::ResourceNotFound { path: path.clone() }),
        }
    }

    fn remove_acl(&self, path: &ResourcePath) -> fabryk_acl::Result<Option<Acl>> {
        let mut nodes = self.write()?;
        Ok(nodes.get_mut(path).and_then(|record| record.acl.take()))
    }

    /// Reads the state and walks the ancestors under one read guard. The
    /// node table is its own hierarchy, so `_hierarchy` is not consulted.
    fn snapshot(
        &self,
        _hierarchy: &dyn HierarchyView,
        path: &ResourcePath,
    ) -> fabryk_acl::Result<Snapshot> {
        let nodes = self.read()?;
        let state = nodes.get(path).map_or(NodeState::Absent, |record| record.state);
        let resolution = if state.is_live() {
            resolve_with(self, path, |node| {
                Ok(nodes.get(node).and_then(|record| record.acl.clone()))
            })?
        } else {
            None
        };
        Ok(Snapshot { state, resolution })
    }
}
