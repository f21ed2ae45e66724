//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global config file,
//! then `LINEAR_`-prefixed environment variables. The same TOML file also
//! holds the stored API key, which [`CredentialStore`] owns.

use crate::error::CliError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod credentials;
mod loader;
mod merge;
mod paths;
mod sources;

pub use credentials::{CredentialStore, KeySource, API_KEY_ENV};
pub use loader::ConfigLoader;
pub use paths::{default_config_path, resolve_config_path, CONFIG_PATH_ENV};

pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearConfig {
    /// Team used by `issues create` when `--team-id` is omitted
    #[serde(default)]
    pub default_team_id: Option<String>,

    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!(
                "api.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            ));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("api timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl LinearConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), CliError> {
        self.api
            .validate()
            .map_err(|e| CliError::config(format!("Invalid configuration: {}", e)))?;
        if matches!(&self.default_team_id, Some(id) if id.trim().is_empty()) {
            return Err(CliError::config(
                "Invalid configuration: default_team_id must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_default_config() {
        let config = LinearConfig::default();
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.default_team_id.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_config_validation() {
        let mut api = ApiConfig::default();
        api.endpoint = "ftp://example.com".to_string();
        assert!(api.validate().is_err());

        api.endpoint = "http://localhost:8080/graphql".to_string();
        assert!(api.validate().is_ok());

        api.request_timeout_secs = 0;
        assert!(api.validate().is_err());
    }

    #[test]
    fn test_empty_default_team_is_config_error() {
        let config = LinearConfig {
            default_team_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: LinearConfig = toml::from_str(
            r#"
api_key = "lin_api_ignored_here"

[api]
request_timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
