//! Hub State CLI Binary
//!
//! Command-line interface for viewing and removing remote stack state.

use clap::Parser;
use hub_state::cli::{Cli, Presenter, RunContext, TerminalPrompt, EXIT_FAILURE};
use hub_state::client::{AdcTokenSource, ReqwestTransport, CLOUD_PLATFORM_SCOPE};
use hub_state::config::{AmbientProjectSource, ConfigLoader, RunSettings, StateConfig};
use hub_state::error::StateError;
use hub_state::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&Presenter::new(cli.output.unwrap_or_default(), ""), &e),
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(&logging_config, cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    info!("hub-state starting");

    let overrides = cli.overrides();
    let output = RunSettings::output_mode(&overrides, &config);
    let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let settings = match RunSettings::resolve(&overrides, &config, &AmbientProjectSource::new()) {
        Ok(settings) => settings,
        Err(e) => fail(&Presenter::new(output, "").with_color(color), &e),
    };
    debug!(endpoint = %settings.endpoint(), "Settings resolved");

    let presenter = Presenter::new(settings.output, settings.project.clone()).with_color(color);
    let transport = match ReqwestTransport::new(settings.verbose) {
        Ok(transport) => transport,
        Err(e) => fail(&presenter, &e),
    };
    let tokens = AdcTokenSource::new(&[CLOUD_PLATFORM_SCOPE]);

    let context = RunContext::new(settings, Arc::new(transport), Arc::new(tokens))
        .with_presenter(presenter);
    let outcome = context.execute(&cli.command, &mut TerminalPrompt);

    if let Some(output) = outcome.output {
        println!("{}", output);
    }
    process::exit(outcome.exit_code);
}

fn load_config(cli: &Cli) -> Result<StateConfig, StateError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Logging configuration with CLI flags applied over the loaded configuration.
fn build_logging_config(cli: &Cli, config: &StateConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}

fn fail(presenter: &Presenter, e: &StateError) -> ! {
    error!("Startup failed: {}", e);
    println!("{}", presenter.render_error(e));
    process::exit(EXIT_FAILURE);
}
