//! Asian option commands

use clap::Args;
use pricer_models::instruments::{ArithmeticAsianOption, GeometricAsianOption, Instrument};

use super::{Context, ControlArgs, MarketArgs, SimulationArgs};
use crate::Result;

/// Arguments of `geometric-asian`
#[derive(Debug, Clone, Args)]
pub struct GeometricAsianArgs {
    #[command(flatten)]
    market: MarketArgs,
    /// Number of averaging dates n
    #[arg(long)]
    observations: usize,
}

/// Run the geometric-asian command
pub fn run_geometric(ctx: &Context, args: &GeometricAsianArgs) -> Result<()> {
    let option = GeometricAsianOption::new(
        args.market.params()?,
        args.observations,
        args.market.option_type()?,
    )?;
    ctx.price_and_emit(Instrument::GeometricAsian(option), None)
}

/// Arguments of `arithmetic-asian`
#[derive(Debug, Clone, Args)]
pub struct ArithmeticAsianArgs {
    #[command(flatten)]
    market: MarketArgs,
    /// Number of averaging dates n
    #[arg(long)]
    observations: usize,
    #[command(flatten)]
    simulation: SimulationArgs,
    #[command(flatten)]
    control: ControlArgs,
}

/// Run the arithmetic-asian command
pub fn run_arithmetic(ctx: &Context, args: &ArithmeticAsianArgs) -> Result<()> {
    let option = ArithmeticAsianOption::new(
        args.market.params()?,
        args.observations,
        args.simulation.paths(&ctx.config),
        args.control.control()?,
        args.market.option_type()?,
    )?;
    ctx.price_and_emit(Instrument::ArithmeticAsian(option), args.simulation.seed)
}
