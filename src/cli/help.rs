//! CLI help and command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string for log spans (e.g. "ls", "rm").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Ls { .. } => "ls",
        Commands::Show { .. } => "show",
        Commands::Rm { .. } => "rm",
    }
}
