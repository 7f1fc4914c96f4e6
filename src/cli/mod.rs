//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bourse")]
#[command(author, version, about = "Event-driven trading venue")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a price sequence against one company and one member
    Simulate(SimulateArgs),
    /// List available buy rules
    Strategies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Company identifier
    #[arg(long, default_value = "Green Bank")]
    pub company: String,

    /// Outstanding shares (defaults to listing.default_shares)
    #[arg(long)]
    pub shares: Option<u64>,

    /// Listing price (defaults to listing.default_price)
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Member cash balance (defaults to member.default_balance)
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Shares bought per trade (defaults to member.default_order_size)
    #[arg(long)]
    pub order_size: Option<u64>,

    /// Buy rule (defaults to strategy.rule)
    #[arg(long)]
    pub rule: Option<String>,

    /// Price updates to apply, in order (comma-separated)
    #[arg(short = 'P', long, value_delimiter = ',', required = true)]
    pub prices: Vec<Decimal>,

    /// Keep replaying after a rejected settlement
    #[arg(long)]
    pub continue_on_reject: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}
