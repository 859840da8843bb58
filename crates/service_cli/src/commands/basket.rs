//! Basket option commands

use clap::Args;
use pricer_models::instruments::{
    ArithmeticBasketOption, BasketParams, GeometricBasketOption, Instrument, OptionType,
};

use super::{parse_option_type, Context, ControlArgs, SimulationArgs};
use crate::Result;

/// Basket market and contract terms
#[derive(Debug, Clone, Args)]
pub struct BasketArgs {
    /// Comma-separated spot prices
    #[arg(long, value_delimiter = ',', required = true)]
    spots: Vec<f64>,
    /// Comma-separated volatilities, one per spot
    #[arg(long, value_delimiter = ',', required = true)]
    volatilities: Vec<f64>,
    /// Constant pairwise correlation ρ
    #[arg(long, allow_negative_numbers = true)]
    correlation: f64,
    /// Continuously compounded risk-free rate r
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rate: f64,
    /// Time to expiry T in years
    #[arg(long)]
    expiry: f64,
    /// Strike K on the basket mean
    #[arg(long)]
    strike: f64,
    /// Option side: call or put
    #[arg(long = "type", default_value = "call")]
    option_type: String,
}

impl BasketArgs {
    fn basket(&self) -> Result<(BasketParams, OptionType)> {
        let basket = BasketParams::new(
            self.spots.clone(),
            self.volatilities.clone(),
            self.correlation,
            self.rate,
            self.expiry,
            self.strike,
        )?;
        Ok((basket, parse_option_type(&self.option_type)?))
    }
}

/// Arguments of `geometric-basket`
#[derive(Debug, Clone, Args)]
pub struct GeometricBasketArgs {
    #[command(flatten)]
    basket: BasketArgs,
}

/// Run the geometric-basket command
pub fn run_geometric(ctx: &Context, args: &GeometricBasketArgs) -> Result<()> {
    let (basket, option_type) = args.basket.basket()?;
    let option = GeometricBasketOption::new(basket, option_type);
    ctx.price_and_emit(Instrument::GeometricBasket(option), None)
}

/// Arguments of `arithmetic-basket`
#[derive(Debug, Clone, Args)]
pub struct ArithmeticBasketArgs {
    #[command(flatten)]
    basket: BasketArgs,
    #[command(flatten)]
    simulation: SimulationArgs,
    #[command(flatten)]
    control: ControlArgs,
}

/// Run the arithmetic-basket command
pub fn run_arithmetic(ctx: &Context, args: &ArithmeticBasketArgs) -> Result<()> {
    let (basket, option_type) = args.basket.basket()?;
    let option = ArithmeticBasketOption::new(
        basket,
        args.simulation.paths(&ctx.config),
        args.control.control()?,
        option_type,
    )?;
    ctx.price_and_emit(Instrument::ArithmeticBasket(option), args.simulation.seed)
}
