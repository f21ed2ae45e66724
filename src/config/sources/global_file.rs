//! Global config file source: `$XDG_CONFIG_HOME/linear/config.toml`, or the
//! path given with `--config` / `LINEAR_CONFIG`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Add the config file to the builder if it exists. A missing file is not an
/// error; the defaults and environment still apply.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        debug!(config_path = %path.display(), "no config file, using defaults");
        return Ok(builder);
    }
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    debug!(config_path = %canonical.display(), "loading config file");
    Ok(builder.add_source(
        File::from(canonical.as_path())
            .format(FileFormat::Toml)
            .required(false),
    ))
}
