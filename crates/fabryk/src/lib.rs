//! Fabryk ACL umbrella crate.
//!
//! This crate re-exports all Fabryk ACL components for convenience.
//! Use feature flags to enable the HTTP binding and the CLI.

#![doc = include_str!("../README.md")]

pub use fabryk_acl as acl;
pub use fabryk_core as core;
pub use fabryk_storage as storage;

#[cfg(feature = "api")]
pub use fabryk_api as api;

#[cfg(feature = "cli")]
pub use fabryk_cli as cli;
