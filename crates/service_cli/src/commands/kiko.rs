//! KIKO barrier option command

use clap::Args;
use pricer_models::instruments::KikoOption;
use pricer_pricing::engine::PriceOutcome;
use pricer_pricing::path_dependent::KikoPricer;
use tracing::info;

use super::{Context, MarketArgs, SimulationArgs};
use crate::output::Report;
use crate::Result;

/// Arguments of `kiko`
#[derive(Debug, Clone, Args)]
pub struct KikoArgs {
    #[command(flatten)]
    market: MarketArgs,
    /// Knock-in barrier L
    #[arg(long)]
    lower: f64,
    /// Knock-out barrier U
    #[arg(long)]
    upper: f64,
    /// Number of monitoring dates n
    #[arg(long)]
    observations: usize,
    /// Rebate paid on knock-out
    #[arg(long, default_value_t = 0.0)]
    rebate: f64,
    /// Absolute spot bump for delta, `[kiko] delta_bump` when omitted
    #[arg(long)]
    bump: Option<f64>,
    #[command(flatten)]
    simulation: SimulationArgs,
}

/// Run the kiko command: price, interval and delta on one point set
pub fn run(ctx: &Context, args: &KikoArgs) -> Result<()> {
    let option = KikoOption::new(
        args.market.params()?,
        args.lower,
        args.upper,
        args.observations,
        args.rebate,
        args.simulation.paths(&ctx.config),
    )?;

    let mc = ctx.config.monte_carlo_config(args.simulation.seed)?;
    let seed = mc.seed();
    let mut pricer = KikoPricer::new(option).with_config(mc);
    if let Some(bump) = args.bump.or(ctx.config.kiko.delta_bump) {
        pricer = pricer.with_bump(bump)?;
    }

    let estimate = pricer.price(seed)?;
    let delta = pricer.delta(seed)?;
    info!(price = estimate.price, delta, seed, "priced KIKO");

    let report = Report::from_outcome("kiko", &PriceOutcome::Kiko(estimate)).with_delta(delta);
    ctx.emit(&report)
}
