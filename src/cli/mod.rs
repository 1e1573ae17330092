//! Command-line interface definitions.

pub mod check;
pub mod limits;
pub mod output;
pub mod pair;
pub mod replay;
pub mod size;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::Config;
use crate::domain::Side;
use crate::error::Result;

/// Riskwarden - pre-trade risk checks, sizing and exposure tracking.
#[derive(Parser, Debug)]
#[command(name = "riskwarden")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file; built-in defaults when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a currency pair and show its trading bounds
    Pair(PairArgs),

    /// Size a trade from its stop distance and risk budget
    Size(SizeArgs),

    /// Check whether a forex trade is viable against an empty book
    Check(CheckArgs),

    /// Show effective risk limits
    Limits(JsonArg),

    /// Apply a JSON journal of operations to a fresh engine
    Replay(ReplayArgs),
}

/// Shared flag for commands that can emit JSON.
#[derive(Parser, Debug)]
pub struct JsonArg {
    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `pair` subcommand.
#[derive(Parser, Debug)]
pub struct PairArgs {
    /// Pair symbol, e.g. EUR/USD, eur_usd or GBP-JPY
    pub symbol: String,

    /// Also check this volume against the pair's bounds
    #[arg(long)]
    pub volume: Option<String>,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `size` subcommand.
#[derive(Parser, Debug)]
pub struct SizeArgs {
    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Stop-loss price
    #[arg(long)]
    pub stop: Decimal,

    /// Account balance
    #[arg(long)]
    pub balance: Decimal,

    /// Percent of balance to risk (1.0 = 1%)
    #[arg(long)]
    pub risk_pct: Decimal,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Pair symbol
    pub symbol: String,

    /// Trade volume
    #[arg(long)]
    pub volume: Decimal,

    /// buy or sell
    #[arg(long, default_value = "buy")]
    pub side: Side,

    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `replay` subcommand.
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// JSON file holding an array of operations
    pub file: PathBuf,

    /// Exit non-zero when any operation fails
    #[arg(long)]
    pub strict: bool,
}

/// Load the configuration file, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Run one parsed command line.
pub fn execute(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    config.init_logging();

    match cli.command {
        Commands::Pair(args) => pair::execute(&config, &args),
        Commands::Size(args) => size::execute(&config, &args),
        Commands::Check(args) => check::execute(&config, &args),
        Commands::Limits(args) => limits::execute(&config, args.json),
        Commands::Replay(args) => replay::execute(&config, &args),
    }
}
