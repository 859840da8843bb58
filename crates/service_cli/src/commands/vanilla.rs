//! European and American option commands

use clap::Args;
use pricer_models::instruments::{AmericanOption, EuropeanOption, Instrument};

use super::{Context, MarketArgs};
use crate::Result;

/// Arguments of `european`
#[derive(Debug, Clone, Args)]
pub struct EuropeanArgs {
    #[command(flatten)]
    market: MarketArgs,
    /// Repo rate / continuous dividend yield q
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    repo_rate: f64,
}

/// Run the european command
pub fn run_european(ctx: &Context, args: &EuropeanArgs) -> Result<()> {
    let option = EuropeanOption::new(
        args.market.params()?,
        args.repo_rate,
        args.market.option_type()?,
    )?;
    ctx.price_and_emit(Instrument::European(option), None)
}

/// Arguments of `american`
#[derive(Debug, Clone, Args)]
pub struct AmericanArgs {
    #[command(flatten)]
    market: MarketArgs,
    /// Number of lattice steps N
    #[arg(long, default_value_t = 500)]
    steps: usize,
}

/// Run the american command
pub fn run_american(ctx: &Context, args: &AmericanArgs) -> Result<()> {
    let option = AmericanOption::new(
        args.market.params()?,
        args.steps,
        args.market.option_type()?,
    )?;
    ctx.price_and_emit(Instrument::American(option), None)
}
