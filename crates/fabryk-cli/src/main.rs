//! Fabryk ACL CLI
//!
//! Command-line interface for the Fabryk ACL decision engine.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use fabryk_cli::commands::{self, CheckRequest, ServeOverrides};
use fabryk_cli::config_handlers::handle_config_command;
use fabryk_cli::{AclConfig, Cli, Command};
use fabryk_core::ConfigManager;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let setup = || -> Result<AclConfig> {
        let config = AclConfig::load(config_path).context("failed to load configuration")?;
        init_logging(&config.logging.level, cli.verbose);
        Ok(config)
    };

    match cli.command {
        Command::Config { action } => {
            handle_config_command(config_path, action)?;
        }
        Command::Serve { seed, host, port } => {
            let config = setup()?;
            commands::serve(&config, ServeOverrides { seed, host, port }).await?;
        }
        Command::Check {
            seed,
            principal,
            groups,
            superuser,
            action,
            json,
            path,
        } => {
            let config = setup()?;
            let request = CheckRequest {
                principal,
                groups,
                superuser,
                action,
                path,
            };
            let verdict = commands::check(config.role_matrix()?, &seed, &request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                println!("{}: {}", verdict.decision, verdict.reason);
            }
            if !verdict.is_allowed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Validate { file } => {
            let config = setup()?;
            let report = commands::validate(&config.role_matrix()?, &file)
                .with_context(|| format!("{file} is not a valid ACL"))?;
            println!(
                "{file}: valid ACL with {} principal(s)",
                report.acl.len()
            );
            for role in &report.unknown_roles {
                eprintln!("warning: role '{role}' is not defined and grants nothing");
            }
        }
        Command::Roles => {
            let config = setup()?;
            println!("{}", commands::render_roles(&config.role_matrix()?));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Install the tracing subscriber; `RUST_LOG` overrides the configured level.
fn init_logging(level: &str, verbose: bool) {
    let default = if verbose { "debug" } else { level };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
