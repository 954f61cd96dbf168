//! Environment source: HUB_STATE_* variables, `__` separating nested keys.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "HUB_STATE";

/// Add the environment layer, e.g. `HUB_STATE_PROJECT`, `HUB_STATE_LOGGING__LEVEL`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    )
}
