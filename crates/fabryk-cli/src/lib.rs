//! # fabryk-cli
//!
//! The `fabryk-acl` command-line tool.
//!
//! - `serve`: run the HTTP binding over an in-memory repository
//! - `check`: evaluate one access decision against a seed file
//! - `validate`: check an ACL payload before posting it
//! - `roles`: print the configured role matrix
//! - `config`: locate, inspect and initialise the configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use cli::{Cli, Command, ConfigAction};
pub use config::AclConfig;
pub use error::{Error, Result};
