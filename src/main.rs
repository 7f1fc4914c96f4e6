//! Trading venue CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use bourse_monitor::setup_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level {
        cli::LogLevel::Trace => "trace",
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    setup_logging(log_level, cli.json_logs);

    // Execute command
    match cli.command {
        Commands::Simulate(args) => cli::commands::simulate::run(args, &cli.config),
        Commands::Strategies => cli::commands::strategies::run(),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
    }
}
