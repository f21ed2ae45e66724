//! Loads [`LinearConfig`] from defaults, the config file and the environment.

use super::merge::merge_policy;
use super::paths::resolve_config_path;
use super::sources::{environment, global_file};
use super::LinearConfig;
use crate::error::CliError;
use config::Map;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds the layered configuration for one invocation.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config file from `path` instead of the default location.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Use `vars` in place of the process environment.
    pub fn with_env(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// The config file this loader reads.
    pub fn config_path(&self) -> Result<PathBuf, CliError> {
        resolve_config_path(self.path.as_deref())
    }

    /// Load and validate the merged configuration.
    pub fn load(&self) -> Result<LinearConfig, CliError> {
        let path = self.config_path()?;
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, &path)?;
        let builder = environment::add_to_builder(builder, self.env.clone());

        let config: LinearConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CliError::config(format!("Failed to load config: {}", e)))?;
        config.validate()?;

        debug!(config_path = %path.display(), endpoint = %config.api.endpoint, "configuration loaded");
        Ok(config)
    }

    /// Load a single file over the defaults, ignoring the environment.
    pub fn load_from_file(path: &Path) -> Result<LinearConfig, CliError> {
        if !path.exists() {
            return Err(CliError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        ConfigLoader::new()
            .with_path(path)
            .with_env(Map::new())
            .load()
    }
}
