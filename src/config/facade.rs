//! Config loading facade: merge defaults, file and environment into [`StateConfig`].

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file};
use super::StateConfig;
use crate::error::StateError;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file (if present) and the environment.
    pub fn load() -> Result<StateConfig, StateError> {
        let builder = global_file::add_to_builder(builder_with_defaults()?)?;
        Self::finish(environment::add_to_builder(builder))
    }

    /// Load defaults, the given file (which must exist) and the environment.
    pub fn load_from_file(path: &Path) -> Result<StateConfig, StateError> {
        let builder = global_file::add_explicit_to_builder(builder_with_defaults()?, path)?;
        Self::finish(environment::add_to_builder(builder))
    }

    /// Location of the global config file, whether or not it exists.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<StateConfig, StateError> {
        let config: StateConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
