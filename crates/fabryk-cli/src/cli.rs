//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Fabryk ACL decision engine.
#[derive(Parser, Debug)]
#[command(name = "fabryk-acl", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "FABRYK_ACL_CONFIG")]
    pub config: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API over an in-memory repository
    Serve {
        /// Repository seed file (JSON or TOML)
        #[arg(long)]
        seed: Option<String>,
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },
    /// Evaluate one access decision against a seed file
    Check {
        /// Repository seed file (JSON or TOML)
        #[arg(long)]
        seed: String,
        /// User principal; anonymous when omitted
        #[arg(long)]
        principal: Option<String>,
        /// Group principal (repeatable)
        #[arg(long = "group")]
        groups: Vec<String>,
        /// Treat the caller as a superuser
        #[arg(long)]
        superuser: bool,
        /// Action to check, e.g. READ or MANAGE_ACL
        #[arg(long)]
        action: String,
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
        /// Resource path
        path: String,
    },
    /// Validate a JSON ACL payload
    Validate {
        /// Payload file
        file: String,
    },
    /// Print the role matrix
    Roles,
    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key, e.g. `server.port`
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
