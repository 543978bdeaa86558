//! Configuration management contract.
//!
//! A binary's configuration type implements [`ConfigManager`] to get file
//! discovery, TOML loading and rendering for free. The CLI's `config`
//! subcommands are generic over this trait.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::util::resolver::PathResolver;
use crate::{Error, Result};

/// Load, locate and render a TOML configuration.
pub trait ConfigManager: Serialize + DeserializeOwned + Default {
    /// Project name used for the config directory and env-var prefix.
    fn project_name() -> &'static str;

    /// File name inside the config directory.
    fn config_file_name() -> &'static str {
        "config.toml"
    }

    /// Resolver used to find the config directory.
    fn resolver() -> PathResolver {
        PathResolver::new(Self::project_name())
            .with_config_marker(&format!("config/{}", Self::config_file_name()))
    }

    /// Default location of the config file, whether or not it exists.
    fn default_config_path() -> Option<PathBuf> {
        Self::resolver()
            .config_dir_or_default()
            .map(|dir| dir.join(Self::config_file_name()))
    }

    /// Explicit path if given, otherwise the default location.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(crate::expand_tilde(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load the configuration.
    ///
    /// An explicitly named file must exist. When no path is given and the
    /// default file is missing, defaults are returned.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            log::debug!("no config directory for {}; using defaults", Self::project_name());
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            log::debug!("{} not found; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Render as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Check semantic constraints after parsing.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
