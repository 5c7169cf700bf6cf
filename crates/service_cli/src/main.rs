//! gbm-pricer: Monte Carlo pricing of European options under GBM
//!
//! # Commands
//!
//! - `gbm-pricer price` - Simulate paths, compare with Black-Scholes, export CSV
//! - `gbm-pricer analytic` - Black-Scholes prices only
//!
//! Missing `price` inputs are prompted for on stdin. Settings come from
//! `gbm_pricer.toml`, then `GBM_PRICER_*` environment variables, then flags.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the pricer crates to a
//! terminal. Reports go to stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod prompt;

pub use error::{CliError, Result};

use commands::{analytic::AnalyticArgs, price::PriceArgs};
use config::CliConfig;

/// European option pricing by Monte Carlo simulation
#[derive(Parser)]
#[command(name = "gbm-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "gbm_pricer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European call and put by Monte Carlo simulation
    Price(PriceArgs),

    /// Black-Scholes prices only
    Analytic(AnalyticArgs),
}

fn init_tracing(config: &CliConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_tracing(&config, cli.verbose);

    info!("gbm-pricer v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Configuration loaded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config, stdin.lock(), &mut out)?,
        Commands::Analytic(args) => commands::analytic::run(args, &mut out)?,
    }

    Ok(())
}
