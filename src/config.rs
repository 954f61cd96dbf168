//! Configuration System
//!
//! Layered configuration (defaults, global or explicit file, `HUB_STATE_*`
//! environment) plus the immutable [`RunSettings`] every command receives. Settings
//! are resolved once at startup and never mutated afterwards.

use crate::client::resolve_endpoint;
use crate::error::StateError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod project;
mod sources;

pub use facade::ConfigLoader;
pub use project::{resolve_project, AmbientProjectSource, ProjectSource, PROJECT_ENV};
pub use sources::global_file::global_config_path;

/// Rendering mode, chosen once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Human tables
    #[default]
    Table,
    /// Indented JSON as received from the service
    Json,
}

/// Root configuration structure (file and environment layers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Project used when `--project` is absent.
    #[serde(default)]
    pub project: Option<String>,

    /// State API location.
    #[serde(default = "default_location")]
    pub location: String,

    /// Default output mode.
    #[serde(default)]
    pub output: OutputMode,

    /// Full base URL of the stacks collection, replacing the location/project template.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_location() -> String {
    crate::client::DEFAULT_LOCATION.to_string()
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            project: None,
            location: default_location(),
            output: OutputMode::default(),
            endpoint: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl StateConfig {
    /// Validate values the deserializer cannot check.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.location.trim().is_empty() {
            return Err(StateError::Config("location cannot be empty".to_string()));
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(StateError::Config(format!(
                    "endpoint must be an http(s) URL, got `{}`",
                    endpoint
                )));
            }
        }
        Ok(())
    }
}

/// Values given on the command line; `None` falls through to configuration.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub project: Option<String>,
    pub location: Option<String>,
    pub output: Option<OutputMode>,
    pub verbose: bool,
}

/// Immutable per-invocation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub project: String,
    pub location: String,
    pub output: OutputMode,
    pub verbose: bool,
    pub endpoint_override: Option<String>,
}

impl RunSettings {
    /// Output mode from flags and configuration alone, usable before the project
    /// is known (so a missing project is reported in the right mode).
    pub fn output_mode(overrides: &SettingsOverrides, config: &StateConfig) -> OutputMode {
        overrides.output.unwrap_or(config.output)
    }

    /// Merge flags over configuration and resolve the project.
    pub fn resolve(
        overrides: &SettingsOverrides,
        config: &StateConfig,
        ambient: &dyn ProjectSource,
    ) -> Result<Self, StateError> {
        let project = resolve_project(
            overrides.project.as_deref(),
            config.project.as_deref(),
            ambient,
        )?;
        Ok(Self {
            project,
            location: overrides
                .location
                .clone()
                .unwrap_or_else(|| config.location.clone()),
            output: Self::output_mode(overrides, config),
            verbose: overrides.verbose,
            endpoint_override: config.endpoint.clone(),
        })
    }

    /// Base URL of the stacks collection.
    pub fn endpoint(&self) -> String {
        match &self.endpoint_override {
            Some(endpoint) => endpoint.clone(),
            None => resolve_endpoint(&self.location, &self.project),
        }
    }
}
