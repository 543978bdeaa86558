//! Filesystem helpers shared by the Fabryk ACL crates.
//!
//! # Modules
//!
//! - [`paths`]: Generic path utilities (binary location, tilde expansion)
//! - [`resolver`]: Config-directory resolution for a named project

pub mod paths;
pub mod resolver;
