//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the config file, then the
//! environment. Tables merge; scalars replace.

use crate::config::DEFAULT_ENDPOINT;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.endpoint", DEFAULT_ENDPOINT)?
        .set_default("api.connect_timeout_secs", 10)?
        .set_default("api.request_timeout_secs", 30)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
