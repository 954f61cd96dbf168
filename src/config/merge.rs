//! Merge rules: defaults, override order.

use crate::client::DEFAULT_LOCATION;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Sources added afterwards override these values in the order they are added;
/// CLI flags are applied on top of the built configuration by the caller.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("location", DEFAULT_LOCATION)?
        .set_default("output", "table")?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.color", true)
}
