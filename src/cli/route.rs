//! CLI route: single dispatch from parsed command to client call, interpretation
//! and presentation. Each command performs at most one API round trip.

use crate::cli::help::command_name;
use crate::cli::output::{exit_code, EXIT_SUCCESS};
use crate::cli::parse::Commands;
use crate::cli::presentation::Presenter;
use crate::cli::prompt::{is_confirmed, removal_question, ConfirmationPrompt};
use crate::client::{HttpTransport, StateApiClient, TokenSource};
use crate::config::RunSettings;
use crate::error::StateError;
use crate::filter::compile_filters;
use crate::response::{interpret_delete, interpret_list, interpret_show, Decoding};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// What the binary prints on stdout and how it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: Option<String>,
    pub exit_code: i32,
}

/// Runtime context for CLI execution: resolved settings, API client and presenter.
pub struct RunContext {
    settings: RunSettings,
    client: StateApiClient,
    presenter: Presenter,
}

impl RunContext {
    pub fn new(
        settings: RunSettings,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let client = StateApiClient::new(transport, tokens, settings.endpoint());
        let presenter = Presenter::new(settings.output, settings.project.clone());
        Self {
            settings,
            client,
            presenter,
        }
    }

    /// Replace the presenter (color, reference time).
    pub fn with_presenter(mut self, presenter: Presenter) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    fn decoding(&self) -> Decoding {
        Decoding::from(self.presenter.mode())
    }

    /// Run one command to completion. Failures are rendered, never returned.
    pub fn execute(
        &self,
        command: &Commands,
        prompt: &mut dyn ConfirmationPrompt,
    ) -> CommandOutcome {
        let span = info_span!(
            "command",
            name = command_name(command),
            project = %self.settings.project
        );
        let _enter = span.enter();

        let result = match command {
            Commands::Ls { filter } => self.handle_list(filter),
            Commands::Show { id, raw } => self.handle_show(id, *raw),
            Commands::Rm { id } => self.handle_remove(id, prompt),
        };

        match result {
            Ok(output) => {
                info!("Command completed");
                CommandOutcome {
                    output,
                    exit_code: EXIT_SUCCESS,
                }
            }
            Err(e) => {
                warn!(error = %e, "Command failed");
                CommandOutcome {
                    output: Some(self.presenter.render_error(&e)),
                    exit_code: exit_code(command, &e),
                }
            }
        }
    }

    fn handle_list(&self, tokens: &[String]) -> Result<Option<String>, StateError> {
        let filters = compile_filters(tokens);
        debug!(?filters, "Listing stacks");
        let response = block_on(self.client.list_stacks(&filters))??;
        let outcome = interpret_list(&response, self.decoding())?;
        Ok(Some(self.presenter.render_list(&outcome)))
    }

    fn handle_show(&self, id: &str, raw: bool) -> Result<Option<String>, StateError> {
        let response = block_on(self.client.get_stack(id, raw))??;
        let decoding = if raw {
            Decoding::Document
        } else {
            self.decoding()
        };
        let outcome = interpret_show(&response, id, decoding)?;
        Ok(Some(self.presenter.render_show(&outcome)))
    }

    fn handle_remove(
        &self,
        id: &str,
        prompt: &mut dyn ConfirmationPrompt,
    ) -> Result<Option<String>, StateError> {
        let answer = prompt.ask(&removal_question(id))?;
        if !is_confirmed(&answer) {
            info!(stack = id, "Removal not confirmed");
            return Ok(None);
        }
        let response = block_on(self.client.delete_stack(id))??;
        let deleted = interpret_delete(&response, id)?;
        Ok(Some(self.presenter.render_delete(&deleted)))
    }
}

/// Drive one request future on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, StateError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
