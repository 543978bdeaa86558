//! Read-only view of the resource tree.

use fabryk_core::ResourcePath;

use crate::Result;
use crate::model::NodeState;

/// Traversal primitives the resolver and engine need from a repository.
///
/// Implementations must be safe to share across request tasks.
pub trait HierarchyView: Send + Sync {
    /// The parent of `path`, or `None` at the root.
    ///
    /// The returned path must be strictly shallower than `path`.
    fn parent_of(&self, path: &ResourcePath) -> Result<Option<ResourcePath>> {
        Ok(path.parent())
    }

    /// Whether the node at `path` is live, tombstoned or absent.
    fn state_of(&self, path: &ResourcePath) -> Result<NodeState>;
}
