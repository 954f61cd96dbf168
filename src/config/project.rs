//! Ambient project resolution: flag, configuration, environment, then gcloud.

use crate::error::StateError;
use std::process::Command;
use tracing::debug;

/// Environment variable holding a fallback project identifier.
pub const PROJECT_ENV: &str = "GOOGLE_PROJECT";

/// Source of a project identifier when none was given explicitly.
pub trait ProjectSource {
    fn lookup(&self) -> Option<String>;
}

/// `GOOGLE_PROJECT`, then `gcloud config get-value core/project`.
pub struct AmbientProjectSource {
    gcloud: String,
}

impl AmbientProjectSource {
    pub fn new() -> Self {
        Self {
            gcloud: "gcloud".to_string(),
        }
    }

    /// Use a different gcloud executable.
    pub fn with_gcloud(gcloud: impl Into<String>) -> Self {
        Self {
            gcloud: gcloud.into(),
        }
    }

    fn query_gcloud(&self) -> Option<String> {
        let output = Command::new(&self.gcloud)
            .args(["config", "get-value", "core/project"])
            .output();
        match output {
            Ok(output) => {
                let value = String::from_utf8_lossy(&output.stdout)
                    .trim_end_matches(&['\n', '\r'][..])
                    .to_string();
                non_empty(value)
            }
            Err(e) => {
                debug!(gcloud = %self.gcloud, error = %e, "gcloud not available");
                None
            }
        }
    }
}

impl Default for AmbientProjectSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectSource for AmbientProjectSource {
    fn lookup(&self) -> Option<String> {
        if let Some(project) = std::env::var(PROJECT_ENV).ok().and_then(non_empty) {
            debug!(source = PROJECT_ENV, "Resolved project from environment");
            return Some(project);
        }
        let project = self.query_gcloud();
        if project.is_some() {
            debug!(source = "gcloud", "Resolved project from gcloud configuration");
        }
        project
    }
}

/// First non-empty of `explicit`, `configured` and the ambient source.
pub fn resolve_project(
    explicit: Option<&str>,
    configured: Option<&str>,
    ambient: &dyn ProjectSource,
) -> Result<String, StateError> {
    explicit
        .map(str::to_string)
        .and_then(non_empty)
        .or_else(|| configured.map(str::to_string).and_then(non_empty))
        .or_else(|| ambient.lookup())
        .ok_or(StateError::MissingProject)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
