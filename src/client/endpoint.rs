//! State API endpoint resolution.

use crate::error::StateError;
use reqwest::Url;

/// Default location of the state API deployment.
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Base URL of the stacks collection for a location/project pair.
pub fn resolve_endpoint(location: &str, project: &str) -> String {
    format!("https://{}-{}.cloudfunctions.net/stacks", location, project)
}

/// URL of a single stack under `base`. The id is one percent-encoded path segment.
pub fn stack_url(base: &str, id: &str) -> Result<String, StateError> {
    let mut url = Url::parse(base)
        .map_err(|e| StateError::Config(format!("Invalid state API endpoint `{}`: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| {
            StateError::Config(format!("State API endpoint `{}` cannot carry a path", base))
        })?
        .pop_if_empty()
        .push(id);
    Ok(url.to_string())
}
