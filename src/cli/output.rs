//! CLI output: error mapping from domain errors to stable exit codes.

use crate::cli::parse::Commands;
use crate::error::StateError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a command that ended with `error`.
///
/// Missing project and configuration failures end every command with a failure
/// code. Otherwise `ls` always exits 0 and prints its error; `show` and `rm`
/// report authentication, not-found, service, decode and transport failures
/// through the exit code.
pub fn exit_code(command: &Commands, error: &StateError) -> i32 {
    match error {
        StateError::MissingProject | StateError::Config(_) => EXIT_FAILURE,
        _ => match command {
            Commands::Ls { .. } => EXIT_SUCCESS,
            Commands::Show { .. } | Commands::Rm { .. } => EXIT_FAILURE,
        },
    }
}
