//! Config file location.

use crate::error::CliError;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "LINEAR_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `$XDG_CONFIG_HOME/linear/config.toml` (platform equivalent elsewhere).
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "linear")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// The explicit path when given, else the default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, CliError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path()
            .ok_or_else(|| CliError::config("Could not determine the configuration directory")),
    }
}
