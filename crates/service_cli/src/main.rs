//! Option Pricer CLI - Command Line Front-End
//!
//! This is the operational entry point for the option pricing engine.
//!
//! # Commands
//!
//! - `option-pricer european` / `american` - Vanilla options
//! - `option-pricer geometric-asian` / `arithmetic-asian` - Discretely averaged options
//! - `option-pricer geometric-basket` / `arithmetic-basket` - Multi-asset baskets
//! - `option-pricer kiko` - Knock-in/knock-out barrier with delta
//! - `option-pricer implied-vol` - Black-Scholes volatility from a premium
//!
//! # Architecture
//!
//! As the service layer, this crate parses numeric parameters, builds the
//! validated instruments, hands them to `pricer_pricing` and prints what
//! comes back. It holds no pricing logic of its own.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::asian::{ArithmeticAsianArgs, GeometricAsianArgs};
use commands::basket::{ArithmeticBasketArgs, GeometricBasketArgs};
use commands::implied_vol::ImpliedVolArgs;
use commands::kiko::KikoArgs;
use commands::vanilla::{AmericanArgs, EuropeanArgs};
use commands::Context;
use config::CliConfig;
use output::OutputFormat;

/// Option pricing engine CLI
#[derive(Parser)]
#[command(name = "option-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option with Black-Scholes
    European(EuropeanArgs),

    /// Price an American option on a binomial lattice
    American(AmericanArgs),

    /// Price a geometric Asian option in closed form
    GeometricAsian(GeometricAsianArgs),

    /// Price an arithmetic Asian option by Monte Carlo
    ArithmeticAsian(ArithmeticAsianArgs),

    /// Price a geometric basket option in closed form
    GeometricBasket(GeometricBasketArgs),

    /// Price an arithmetic basket option by Monte Carlo
    ArithmeticBasket(ArithmeticBasketArgs),

    /// Price a KIKO barrier option and its delta by quasi-Monte Carlo
    Kiko(KikoArgs),

    /// Solve for the Black-Scholes implied volatility
    ImpliedVol(ImpliedVolArgs),
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing on stderr, stdout carries the results
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose))
        .init();

    let config = CliConfig::resolve(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("loading configuration from {}", path.display()),
        None => "building default configuration".to_string(),
    })?;
    debug!(?config, "configuration resolved");

    let ctx = Context {
        config,
        format: cli.format,
    };

    match &cli.command {
        Commands::European(args) => commands::vanilla::run_european(&ctx, args),
        Commands::American(args) => commands::vanilla::run_american(&ctx, args),
        Commands::GeometricAsian(args) => commands::asian::run_geometric(&ctx, args),
        Commands::ArithmeticAsian(args) => commands::asian::run_arithmetic(&ctx, args),
        Commands::GeometricBasket(args) => commands::basket::run_geometric(&ctx, args),
        Commands::ArithmeticBasket(args) => commands::basket::run_arithmetic(&ctx, args),
        Commands::Kiko(args) => commands::kiko::run(&ctx, args),
        Commands::ImpliedVol(args) => commands::implied_vol::run(&ctx, args),
    }?;

    info!("done");
    Ok(())
}
