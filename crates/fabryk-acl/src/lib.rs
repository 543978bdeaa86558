//! # fabryk-acl
//!
//! Access control for hierarchical Fabryk repositories.
//!
//! Every resource lives at a path in a tree and may carry a directly attached
//! access control list mapping principals to roles. A decision for a
//! (principal set, resource, action) triple finds the nearest governing ACL
//! on the ancestor chain and maps the caller's roles through a fixed
//! role→action matrix.
//!
//! - [`model`]: principals, roles, actions, ACLs and callers
//! - [`hierarchy`]: read-only view of the resource tree
//! - [`store`]: storage of directly attached ACLs
//! - [`policy`]: the role matrix
//! - [`resolver`]: nearest-ACL-wins lookup
//! - [`enforcement`]: the decision engine
//! - [`gateway`]: validated create/replace/delete/read of ACLs
//!
//! The tree and the ACL store are external collaborators supplied through
//! the [`HierarchyView`] and [`AclStore`] traits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod enforcement;
pub mod error;
pub mod gateway;
pub mod hierarchy;
pub mod model;
pub mod policy;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod testing;

pub use enforcement::{Decision, DecisionEngine, Reason, Verdict};
pub use error::{Error, Result};
pub use gateway::{AclGateway, SetOutcome};
pub use hierarchy::HierarchyView;
pub use model::{
    Acl, Action, Assignments, Caller, NodeState, Principal, PrincipalClass, PrincipalSet, Role,
};
pub use policy::{RoleMatrix, RoleMatrixConfig};
pub use resolver::{Resolution, Resolver, Snapshot, resolve_with};
pub use store::AclStore;
