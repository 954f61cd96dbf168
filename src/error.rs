//! Error types for the hub-state client.

use thiserror::Error;

/// Every failure a command can end with.
///
/// Errors never escape a command invocation: the route renders them through the
/// active presenter and maps them to an exit code.
#[derive(Debug, Error)]
pub enum StateError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No project identifier from flags, configuration, environment or gcloud.
    #[error("GCP Project ID is not set")]
    MissingProject,

    /// Token source or token acquisition failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// No response was obtained (DNS, TLS, connection reset, ...).
    #[error("{0}")]
    Transport(String),

    /// The service answered 404 for the requested stack.
    #[error("State \"{id}\" not found")]
    NotFound { id: String },

    /// Any other non-success status; carries the status line verbatim.
    #[error("{status}")]
    Service { status: String },

    /// A success status whose body was not the expected document.
    #[error("Failed to decode response for \"{id}\" ({status}): {detail}")]
    Decode {
        id: String,
        status: String,
        detail: String,
    },

    /// Reading interactive confirmation failed.
    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for StateError {
    fn from(err: config::ConfigError) -> Self {
        StateError::Config(err.to_string())
    }
}

