//! CLI command implementations
//!
//! Each submodule implements one instrument family. Shared argument groups
//! and the per-invocation [`Context`] live here.

pub mod asian;
pub mod basket;
pub mod implied_vol;
pub mod kiko;
pub mod vanilla;

use clap::Args;
use pricer_models::instruments::{ControlVariate, Instrument, InstrumentParams, OptionType};
use pricer_pricing::engine::price_instrument;
use tracing::info;

use crate::config::CliConfig;
use crate::output::{OutputFormat, Report};
use crate::Result;

/// Settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Resolved configuration
    pub config: CliConfig,
    /// Output format
    pub format: OutputFormat,
}

impl Context {
    /// Print `report` in the selected format
    pub fn emit(&self, report: &Report) -> Result<()> {
        println!("{}", report.render(self.format)?);
        Ok(())
    }

    /// Price `instrument` through the engine and print the result
    pub fn price_and_emit(&self, instrument: Instrument, seed: Option<u64>) -> Result<()> {
        let mc = self.config.monte_carlo_config(seed)?;
        let outcome = price_instrument(&instrument, &mc)?;
        info!(instrument = instrument.kind(), value = outcome.value(), "priced");
        self.emit(&Report::from_outcome(instrument.kind(), &outcome))
    }
}

/// Single-asset market and contract terms
#[derive(Debug, Clone, Args)]
pub struct MarketArgs {
    /// Spot price S₀
    #[arg(long)]
    pub spot: f64,
    /// Strike K
    #[arg(long)]
    pub strike: f64,
    /// Time to expiry T in years
    #[arg(long)]
    pub expiry: f64,
    /// Continuously compounded risk-free rate r
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rate: f64,
    /// Volatility σ
    #[arg(long)]
    pub volatility: f64,
    /// Option side: call or put
    #[arg(long = "type", default_value = "call")]
    pub option_type: String,
}

impl MarketArgs {
    /// Validated common parameters
    pub fn params(&self) -> Result<InstrumentParams> {
        Ok(InstrumentParams::new(
            self.spot,
            self.rate,
            self.expiry,
            self.strike,
            self.volatility,
        )?)
    }

    /// Parsed option side
    pub fn option_type(&self) -> Result<OptionType> {
        parse_option_type(&self.option_type)
    }
}

/// Simulation controls
#[derive(Debug, Clone, Args)]
pub struct SimulationArgs {
    /// Number of paths, `[monte_carlo] paths` when omitted
    #[arg(long)]
    pub paths: Option<usize>,
    /// Random seed, `[monte_carlo] seed` when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SimulationArgs {
    /// Path count after the config default
    pub fn paths(&self, config: &CliConfig) -> usize {
        self.paths.unwrap_or(config.monte_carlo.paths)
    }
}

/// Control variate selection
#[derive(Debug, Clone, Args)]
pub struct ControlArgs {
    /// Control variate: none or geometric
    #[arg(long, default_value = "geometric")]
    pub control: String,
}

impl ControlArgs {
    /// Parsed control variate
    pub fn control(&self) -> Result<ControlVariate> {
        Ok(self.control.parse()?)
    }
}

/// Parse an option side, rejecting anything but call / put
pub fn parse_option_type(raw: &str) -> Result<OptionType> {
    Ok(raw.parse()?)
}
