//! Environment source: `LINEAR_<KEY>` with `__` between nested keys, e.g.
//! `LINEAR_API__ENDPOINT` or `LINEAR_LOGGING__LEVEL`.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, Map};

pub const ENV_PREFIX: &str = "LINEAR";

/// Add the environment source. `vars` replaces the process environment when
/// given.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(vars),
    )
}
