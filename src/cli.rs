//! CLI domain: parse, route, help, output, prompt and presentation only.
//! A single route table dispatches each command to the state API client.

mod help;
mod output;
mod parse;
mod presentation;
mod prompt;
mod route;

pub use help::command_name;
pub use output::{exit_code, EXIT_FAILURE, EXIT_SUCCESS};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_error_json, format_relative_time, format_stack_detail, format_stack_table,
    format_structured, Presenter, LIST_LIMIT, NOTHING_FOUND,
};
pub use prompt::{
    is_confirmed, removal_question, ConfirmationPrompt, ReaderPrompt, TerminalPrompt,
    ACCEPTED_ANSWERS,
};
pub use route::{CommandOutcome, RunContext};
