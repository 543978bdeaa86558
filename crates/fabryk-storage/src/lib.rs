//! # fabryk-storage
//!
//! Repository backends for the Fabryk ACL engine.
//!
//! - [`memory`]: an in-memory repository implementing both
//!   [`HierarchyView`](fabryk_acl::HierarchyView) and
//!   [`AclStore`](fabryk_acl::AclStore), with node lifecycle
//!   (create, tombstone, purge)
//! - [`seed`]: JSON/TOML fixtures that populate a repository

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod memory;
pub mod seed;

pub use error::{Error, Result};
pub use memory::MemoryRepository;
pub use seed::{RepositorySeed, SeedResource};
