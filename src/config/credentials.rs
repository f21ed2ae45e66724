//! Stored API key.
//!
//! The key lives under `api_key` in the global config file. `LINEAR_API_KEY`
//! takes precedence over the file when set and non-empty. Writes keep every
//! other key in the file intact.

use crate::error::CliError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const API_KEY_ENV: &str = "LINEAR_API_KEY";
const API_KEY_FIELD: &str = "api_key";

/// Where the active key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    Environment,
    Config,
}

impl KeySource {
    pub fn as_str(self) -> &'static str {
        match self {
            KeySource::Environment => "environment",
            KeySource::Config => "config",
        }
    }
}

/// Reads and persists the API key for one invocation.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    env_key: Option<String>,
}

impl CredentialStore {
    /// Store backed by `path`, with the environment key read from the process.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_env_key(path, std::env::var(API_KEY_ENV).ok())
    }

    /// Store backed by `path` with an explicit environment key.
    pub fn with_env_key(path: impl Into<PathBuf>, env_key: Option<String>) -> Self {
        Self {
            path: path.into(),
            env_key: env_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn get_api_key(&self) -> Result<Option<String>, CliError> {
        Ok(self.lookup()?.map(|(key, _)| key))
    }

    pub fn source(&self) -> Result<Option<KeySource>, CliError> {
        Ok(self.lookup()?.map(|(_, source)| source))
    }

    /// The active key, or `NOT_AUTHENTICATED`.
    pub fn require_api_key(&self) -> Result<String, CliError> {
        self.get_api_key()?.ok_or_else(|| {
            CliError::not_authenticated(format!(
                "Not authenticated. Run 'linear auth login' or set {}.",
                API_KEY_ENV
            ))
        })
    }

    pub fn save_api_key(&self, key: &str) -> Result<(), CliError> {
        let mut table = self.read_table()?;
        table.insert(
            API_KEY_FIELD.to_string(),
            toml::Value::String(key.to_string()),
        );
        self.write_table(&table)?;
        debug!(config_path = %self.path.display(), "saved API key");
        Ok(())
    }

    /// Remove the stored key. Returns whether the file held one.
    pub fn remove_api_key(&self) -> Result<bool, CliError> {
        if !self.path.exists() {
            return Ok(false);
        }
        let mut table = self.read_table()?;
        let removed = table.remove(API_KEY_FIELD).is_some();
        if removed {
            self.write_table(&table)?;
            debug!(config_path = %self.path.display(), "removed API key");
        }
        Ok(removed)
    }

    fn lookup(&self) -> Result<Option<(String, KeySource)>, CliError> {
        if let Some(key) = &self.env_key {
            return Ok(Some((key.clone(), KeySource::Environment)));
        }
        let table = self.read_table()?;
        Ok(table
            .get(API_KEY_FIELD)
            .and_then(toml::Value::as_str)
            .filter(|k| !k.trim().is_empty())
            .map(|k| (k.to_string(), KeySource::Config)))
    }

    fn read_table(&self) -> Result<toml::Table, CliError> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            CliError::config(format!(
                "Failed to read config file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        content.parse::<toml::Table>().map_err(|e| {
            CliError::config(format!(
                "Failed to parse config file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_table(&self, table: &toml::Table) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::config(format!("Failed to create config directory: {}", e))
            })?;
        }
        let content = toml::to_string_pretty(table)
            .map_err(|e| CliError::config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&self.path, content).map_err(|e| {
            CliError::config(format!(
                "Failed to write config file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        restrict_permissions(&self.path)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), CliError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|e| CliError::config(format!("Failed to set config file permissions: {}", e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), CliError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    fn store(dir: &TempDir, env_key: Option<&str>) -> CredentialStore {
        CredentialStore::with_env_key(
            dir.path().join("linear").join("config.toml"),
            env_key.map(str::to_string),
        )
    }

    #[test]
    fn test_no_key_anywhere() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, None);
        assert_eq!(store.get_api_key().unwrap(), None);
        assert_eq!(store.source().unwrap(), None);
        assert_eq!(
            store.require_api_key().unwrap_err().code,
            ErrorCode::NotAuthenticated
        );
    }

    #[test]
    fn test_save_then_read_from_config() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, None);
        store.save_api_key("lin_api_saved").unwrap();
        assert_eq!(store.get_api_key().unwrap().as_deref(), Some("lin_api_saved"));
        assert_eq!(store.source().unwrap(), Some(KeySource::Config));
    }

    #[test]
    fn test_environment_key_wins() {
        let dir = TempDir::new().unwrap();
        store(&dir, None).save_api_key("lin_api_saved").unwrap();
        let store = store(&dir, Some("lin_api_env"));
        assert_eq!(store.require_api_key().unwrap(), "lin_api_env");
        assert_eq!(store.source().unwrap(), Some(KeySource::Environment));
    }

    #[test]
    fn test_empty_environment_key_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, Some(""));
        assert_eq!(store.get_api_key().unwrap(), None);
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, None);
        fs::create_dir_all(store.config_path().parent().unwrap()).unwrap();
        fs::write(
            store.config_path(),
            "default_team_id = \"team-1\"\n\n[api]\nrequest_timeout_secs = 5\n",
        )
        .unwrap();

        store.save_api_key("lin_api_new").unwrap();
        let table: toml::Table = fs::read_to_string(store.config_path())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(table["default_team_id"].as_str(), Some("team-1"));
        assert_eq!(table["api"]["request_timeout_secs"].as_integer(), Some(5));
        assert_eq!(table["api_key"].as_str(), Some("lin_api_new"));
    }

    #[test]
    fn test_remove_api_key() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, None);
        assert!(!store.remove_api_key().unwrap());

        store.save_api_key("lin_api_saved").unwrap();
        assert!(store.remove_api_key().unwrap());
        assert_eq!(store.get_api_key().unwrap(), None);
        assert!(!store.remove_api_key().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let store = store(&dir, None);
        store.save_api_key("lin_api_saved").unwrap();
        let mode = fs::metadata(store.config_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, None);
        fs::create_dir_all(store.config_path().parent().unwrap()).unwrap();
        fs::write(store.config_path(), "api_key = ").unwrap();
        assert_eq!(store.get_api_key().unwrap_err().code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_key_source_labels() {
        assert_eq!(KeySource::Environment.as_str(), "environment");
        assert_eq!(
            serde_json::to_value(KeySource::Config).unwrap(),
            serde_json::json!("config")
        );
    }
}
