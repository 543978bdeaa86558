//! Storage of directly attached ACLs.

use fabryk_core::ResourcePath;

use crate::Result;
use crate::hierarchy::HierarchyView;
use crate::model::Acl;
use crate::resolver::{Snapshot, resolve_with};

/// Maps a resource to the ACL attached directly to it.
///
/// Each call is atomic with respect to every other call on the same store:
/// a reader sees the complete ACL before or after a `put`/`remove`, never a
/// partial write. Destroying a node must also remove its ACL.
pub trait AclStore: Send + Sync {
    /// The ACL attached directly to `path`, if any.
    fn get_acl(&self, path: &ResourcePath) -> Result<Option<Acl>>;

    /// Replace the ACL on `path`, returning the one it displaced.
    fn put_acl(&self, path: &ResourcePath, acl: Acl) -> Result<Option<Acl>>;

    /// Detach the ACL on `path`, returning it if there was one.
    fn remove_acl(&self, path: &ResourcePath) -> Result<Option<Acl>>;

    /// Returns `true` if `path` carries a direct ACL.
    fn has_acl(&self, path: &ResourcePath) -> Result<bool> {
        Ok(self.get_acl(path)?.is_some())
    }

    /// State of `path` and its governing ACL as one consistent read.
    ///
    /// The default makes separate `state_of` and `get_acl` calls, so a
    /// concurrent tombstone may land between them. A store that also holds
    /// the tree should override this and answer from a single lock; such an
    /// override may ignore `hierarchy`.
    fn snapshot(&self, hierarchy: &dyn HierarchyView, path: &ResourcePath) -> Result<Snapshot> {
        let state = hierarchy.state_of(path)?;
        let resolution = if state.is_live() {
            resolve_with(hierarchy, path, |node| self.get_acl(node))?
        } else {
            None
        };
        Ok(Snapshot { state, resolution })
    }
}
