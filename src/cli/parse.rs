//! CLI parse: clap types for hub-state. No behavior; definitions only.

use crate::config::{OutputMode, SettingsOverrides};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hub remote state viewer and manager
#[derive(Debug, Parser)]
#[command(name = "hub-state")]
#[command(about = "Hub remote state viewer and manager")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GCP Project ID
    #[arg(short = 'p', long, global = true)]
    pub project: Option<String>,

    /// Location of State API endpoint [default: us-central1]
    #[arg(short = 'l', long = "stateAPILocation", global = true)]
    pub state_api_location: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true)]
    pub output: Option<OutputMode>,

    /// Verbose: trace requests and responses on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// List all stacks within a project
    Ls {
        /// Filter by name, status or initiator. Example: --filter "name=GKE,status=incomplete"
        #[arg(long, value_delimiter = ',')]
        filter: Vec<String>,
    },
    /// Show details of a stack
    Show {
        /// Stack ID
        id: String,
        /// Show the stored state document instead of the stack summary
        #[arg(long)]
        raw: bool,
    },
    /// Removes stack state from the project
    Rm {
        /// Stack ID
        id: String,
    },
}

impl Cli {
    /// Flag values that take precedence over configuration.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            project: self.project.clone(),
            location: self.state_api_location.clone(),
            output: self.output,
            verbose: self.verbose,
        }
    }
}
