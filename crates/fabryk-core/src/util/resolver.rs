//! Configurable config-directory resolver.
//!
//! `PathResolver` locates a project's configuration directory using an
//! environment variable, a marker next to the running binary, and finally a
//! fallback path.
//!
//! # Example
//!
//! ```no_run
//! use fabryk_core::util::resolver::PathResolver;
//!
//! let resolver = PathResolver::new("fabryk-acl")
//!     .with_config_marker("config/acl.toml");
//!
//! // Checks FABRYK_ACL_CONFIG_DIR, then searches upward from the binary.
//! if let Some(config) = resolver.config_dir() {
//!     println!("Config: {:?}", config);
//! }
//! ```

use std::env;
use std::path::PathBuf;

use crate::util::paths::{binary_dir, expand_tilde, find_dir_with_marker};

/// Config-directory resolver for a specific project.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Project name (e.g., "fabryk-acl")
    project_name: String,
    /// Environment variable prefix (e.g., "FABRYK_ACL")
    env_prefix: String,
    /// Marker file/dir that identifies a config directory (e.g., "config/acl.toml")
    config_marker: Option<String>,
    /// Fallback config path (expanded with tilde)
    config_fallback: Option<PathBuf>,
}

impl PathResolver {
    /// Create a new resolver for the given project name.
    ///
    /// The project name is converted to an environment variable prefix:
    /// - "fabryk-acl" → "FABRYK_ACL"
    /// - "my_project" → "MY_PROJECT"
    pub fn new(project_name: &str) -> Self {
        let env_prefix = project_name.to_uppercase().replace(['-', ' '], "_");

        Self {
            project_name: project_name.to_string(),
            env_prefix,
            config_marker: None,
            config_fallback: None,
        }
    }

    /// Set the marker file/directory that identifies a config directory.
    pub fn with_config_marker(mut self, marker: &str) -> Self {
        self.config_marker = Some(marker.to_string());
        self
    }

    /// Set a fallback path for the config directory (supports ~ expansion).
    pub fn with_config_fallback(mut self, path: &str) -> Self {
        self.config_fallback = Some(expand_tilde(path));
        self
    }

    /// Get the environment variable name for a given suffix.
    ///
    /// # Example
    /// ```
    /// use fabryk_core::util::resolver::PathResolver;
    ///
    /// let resolver = PathResolver::new("fabryk-acl");
    /// assert_eq!(resolver.env_var("CONFIG_DIR"), "FABRYK_ACL_CONFIG_DIR");
    /// ```
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// Resolve an existing config directory.
    ///
    /// Checks in order:
    /// 1. `{PROJECT}_CONFIG_DIR` environment variable
    /// 2. Walk up from binary looking for the config marker
    /// 3. Fallback path (if configured)
    pub fn config_dir(&self) -> Option<PathBuf> {
        if let Ok(path) = env::var(self.env_var("CONFIG_DIR")) {
            let path = expand_tilde(&path);
            if path.exists() {
                return Some(path);
            }
        }

        if let (Some(bin_dir), Some(marker)) = (binary_dir(), &self.config_marker) {
            if let Some(root) = find_dir_with_marker(&bin_dir, marker) {
                // Nested markers ("config/acl.toml") resolve to their first component.
                if let Some(first_component) = marker.split('/').next() {
                    let config_path = root.join(first_component);
                    if config_path.is_dir() {
                        return Some(config_path);
                    }
                }
                return Some(root);
            }
        }

        if let Some(fallback) = &self.config_fallback {
            if fallback.exists() {
                return Some(fallback.clone());
            }
        }

        None
    }

    /// Resolve the config directory, falling back to the platform config
    /// directory (`dirs::config_dir()/{project}`) even if it does not exist yet.
    pub fn config_dir_or_default(&self) -> Option<PathBuf> {
        self.config_dir()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(&self.project_name)))
    }

    /// Get the project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get the environment variable prefix.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }
}
