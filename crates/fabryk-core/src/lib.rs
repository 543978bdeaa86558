//! Fabryk Core — shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across all Fabryk crates.
//! It has no internal Fabryk dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`resources`]: Hierarchical resource paths
//! - [`traits`]: Configuration management contract
//! - [`util`]: Path and config-directory utilities

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod resources;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use resources::ResourcePath;
pub use traits::ConfigManager;

// Convenience re-exports from util
pub use util::paths::expand_tilde;
pub use util::resolver::PathResolver;
