//! Implied volatility command

use clap::Args;
use pricer_models::analytical::ImpliedVolatilitySolver;
use tracing::info;

use super::{parse_option_type, Context};
use crate::output::Report;
use crate::Result;

/// Arguments of `implied-vol`
#[derive(Debug, Clone, Args)]
pub struct ImpliedVolArgs {
    /// Spot price S₀
    #[arg(long)]
    spot: f64,
    /// Strike K
    #[arg(long)]
    strike: f64,
    /// Time to expiry T in years
    #[arg(long)]
    expiry: f64,
    /// Continuously compounded risk-free rate r
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rate: f64,
    /// Repo rate / continuous dividend yield q
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    repo_rate: f64,
    /// Observed option premium
    #[arg(long)]
    premium: f64,
    /// Option side: call or put
    #[arg(long = "type", default_value = "call")]
    option_type: String,
}

/// Run the implied-vol command
pub fn run(ctx: &Context, args: &ImpliedVolArgs) -> Result<()> {
    let solver = ImpliedVolatilitySolver::with_config(ctx.config.solver_config()?);
    let sigma = solver.solve(
        parse_option_type(&args.option_type)?,
        args.spot,
        args.rate,
        args.repo_rate,
        args.expiry,
        args.strike,
        args.premium,
    )?;
    info!(sigma, premium = args.premium, "implied volatility solved");
    ctx.emit(&Report::value("implied_volatility", sigma))
}
