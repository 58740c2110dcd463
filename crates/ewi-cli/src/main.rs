// crates/ewi-cli/src/main.rs
//
// CLI entrypoint for the EWI economics calculator.
//
// Provides subcommands for the emission schedule at a height, the state of a
// two-token reserve bank, sampled emission curves, and the effective
// protocol parameters.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::bank::BankCmd;
use commands::emission::EmissionCmd;
use commands::series::SeriesCmd;
use config::EwiConfig;
use output::OutputFormat;
use tracing_subscriber::EnvFilter;

/// EWI: emission and reserve-bank calculator.
#[derive(Parser, Debug)]
#[command(
    name = "ewi",
    version = "0.1.0",
    about = "Emission schedule and SigmaUSD-style reserve bank calculator"
)]
struct Cli {
    /// Path to the TOML configuration file. Defaults to ~/.ewi/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format. Overrides the configured default.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Emission state and epoch progress at a block height.
    Emission(EmissionCmd),

    /// Prices, reserve ratio, and mint/redeem capacity of the bank.
    Bank(BankCmd),

    /// Sampled emission curve over a height range.
    Series(SeriesCmd),

    /// Effective emission and bank parameters.
    Params,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let explicit = cli.config.is_some();
    let path = cli.config.clone().or_else(EwiConfig::default_path);
    let loaded = path.as_deref().map(EwiConfig::load);
    let config = match &loaded {
        Some(Ok(cfg)) => cfg.clone(),
        _ => EwiConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match (&path, loaded) {
        (Some(p), Some(Ok(_))) => tracing::debug!("Loaded configuration from {}", p.display()),
        (Some(p), Some(Err(e))) if explicit => {
            tracing::warn!("Could not load config from {}: {}. Using defaults.", p.display(), e)
        }
        (Some(p), Some(Err(e))) => {
            tracing::debug!("No config at {} ({}). Using defaults.", p.display(), e)
        }
        _ => tracing::debug!("No home directory. Using default configuration."),
    }

    let format = cli.format.unwrap_or(config.output);

    match &cli.command {
        Commands::Emission(cmd) => commands::emission::run(cmd, &config, format)?,
        Commands::Bank(cmd) => commands::bank::run(cmd, &config, format)?,
        Commands::Series(cmd) => commands::series::run(cmd, &config, format)?,
        Commands::Params => commands::params::run(&config, format)?,
    }

    Ok(())
}
