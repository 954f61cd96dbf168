//! CLI presentation: one presenter per invocation, one render function per result type.

mod list;
mod shared;
mod show;

pub use list::{format_stack_table, LIST_LIMIT, NOTHING_FOUND};
pub use shared::{format_error_json, format_relative_time, format_structured};
pub use show::format_stack_detail;

use crate::config::OutputMode;
use crate::error::StateError;
use crate::response::{Deleted, ListOutcome, ShowOutcome};
use chrono::{DateTime, Utc};
use serde_json::json;

/// Renders command results in the output mode fixed at startup.
#[derive(Debug, Clone)]
pub struct Presenter {
    mode: OutputMode,
    project: String,
    color: bool,
    now: DateTime<Utc>,
}

impl Presenter {
    pub fn new(mode: OutputMode, project: impl Into<String>) -> Self {
        Self {
            mode,
            project: project.into(),
            color: false,
            now: Utc::now(),
        }
    }

    /// Enable ANSI styling of headings (tabular mode only).
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Reference instant for relative times.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn render_list(&self, outcome: &ListOutcome) -> String {
        match (self.mode, outcome) {
            (_, ListOutcome::Document(document)) => format_structured(document),
            (_, ListOutcome::Stacks(stacks)) => {
                format_stack_table(&self.project, stacks, self.now, self.color)
            }
            (OutputMode::Json, ListOutcome::Empty(document)) => format_structured(document),
            (OutputMode::Table, ListOutcome::Empty(_)) => NOTHING_FOUND.to_string(),
        }
    }

    /// Documents (structured mode, `--raw`) are always re-serialized as received.
    pub fn render_show(&self, outcome: &ShowOutcome) -> String {
        match outcome {
            ShowOutcome::Document(document) => format_structured(document),
            ShowOutcome::Stack(stack) => format_stack_detail(stack, self.now, self.color),
        }
    }

    pub fn render_delete(&self, deleted: &Deleted) -> String {
        match self.mode {
            OutputMode::Json => json!({ "removed": deleted.id }).to_string(),
            OutputMode::Table => format!("State \"{}\" is removed", deleted.id),
        }
    }

    pub fn render_error(&self, error: &StateError) -> String {
        match self.mode {
            OutputMode::Json => format_error_json(&error_message(error)),
            OutputMode::Table => match error {
                StateError::MissingProject => MISSING_PROJECT_HELP.to_string(),
                StateError::Decode { id, .. } if id.is_empty() => NOTHING_FOUND.to_string(),
                other => format!("Error: {}", error_message(other)),
            },
        }
    }
}

const MISSING_PROJECT_HELP: &str = "GCP Project ID is not set. Please do one of the following:
* re-run the command with --project flag
* set GOOGLE_PROJECT env variable
* set the Project ID using `gcloud config set project <project-id>` command";

/// User-facing message for an error, without the `Error: ` prefix.
///
/// A success status without the expected body is indistinguishable from a missing
/// stack from the client's side, so it reads as not-found.
fn error_message(error: &StateError) -> String {
    match error {
        StateError::Decode { id, .. } if id.is_empty() => NOTHING_FOUND.to_string(),
        StateError::Decode { id, .. } => StateError::NotFound { id: id.clone() }.to_string(),
        other => other.to_string(),
    }
}
