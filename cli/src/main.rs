//! Freight CLI - Entry Point
//!
//! Command line interface to the Freight deploy service.

use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use freight_cli::cli::{Cli, Commands};
use freight_cli::commands;
use freight_cli::config::Config;
use freight_cli::errors::FreightError;
use freight_cli::logs::{init_logging, LogOptions};

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = match cli.config(|name| env::var(name).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = init_logging(LogOptions::new(config.log_level, config.debug)) {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("Using API at {}", config.api_root());

    // Single-threaded runtime: commands run strictly sequentially
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli.command, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &Config) -> Result<(), FreightError> {
    let color = io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();

    commands::run(command, config, &mut stdout, color).await
}
