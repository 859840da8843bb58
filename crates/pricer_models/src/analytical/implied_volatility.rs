//! Black-Scholes implied volatility by Newton-Raphson.
//!
//! The premium is first checked against the static no-arbitrage bounds of
//! its side, then inverted starting from the inflection point of the
//! price-volatility curve:
//!
//! σ₀ = √(2·|ln(S/K) + (r − q)T| / T)
//!
//! which makes the Newton sequence monotone. The guess is floored at
//! [`MIN_INITIAL_GUESS`] when the option is struck at the forward.

use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use pricer_core::types::PricingError;

use super::black_scholes::BlackScholes;
use crate::instruments::{InstrumentError, InstrumentParams, OptionType};

/// Slack allowed on the no-arbitrage bounds for floating-point noise.
pub const BOUND_TOLERANCE: f64 = 1e-6;

/// Floor applied to the initial volatility guess.
pub const MIN_INITIAL_GUESS: f64 = 1e-2;

/// Static no-arbitrage bounds `(lower, upper)` of a European premium.
///
/// - call: `[max(S·e^(−qT) − K·e^(−rT), 0), S·e^(−qT)]`
/// - put: `[max(K·e^(−rT) − S·e^(−qT), 0), K·e^(−rT)]`
///
/// # Examples
/// ```
/// use pricer_models::analytical::premium_bounds;
/// use pricer_models::instruments::OptionType;
///
/// let (lower, upper) = premium_bounds(OptionType::Put, 100.0, 0.0, 0.0, 1.0, 120.0);
/// assert!((lower - 20.0).abs() < 1e-12);
/// assert!((upper - 120.0).abs() < 1e-12);
/// ```
pub fn premium_bounds(
    option_type: OptionType,
    spot: f64,
    rate: f64,
    dividend: f64,
    expiry: f64,
    strike: f64,
) -> (f64, f64) {
    let spot_leg = spot * (-dividend * expiry).exp();
    let strike_leg = strike * (-rate * expiry).exp();
    match option_type {
        OptionType::Call => ((spot_leg - strike_leg).max(0.0), spot_leg),
        OptionType::Put => ((strike_leg - spot_leg).max(0.0), strike_leg),
    }
}

/// Newton-Raphson implied volatility solver.
///
/// # Examples
/// ```
/// use pricer_core::math::solvers::SolverConfig;
/// use pricer_models::analytical::ImpliedVolatilitySolver;
/// use pricer_models::instruments::OptionType;
///
/// let solver = ImpliedVolatilitySolver::with_config(SolverConfig::new(1e-8, 50));
/// let sigma = solver
///     .solve(OptionType::Call, 2.0, 0.03, 0.01, 3.0, 2.0, 0.4841)
///     .unwrap();
/// assert!((sigma - 0.3311).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ImpliedVolatilitySolver {
    config: SolverConfig<f64>,
}

impl Default for ImpliedVolatilitySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpliedVolatilitySolver {
    /// Solver with tolerance 1e-6 on the premium and 100 iterations.
    pub fn new() -> Self {
        Self {
            config: SolverConfig::implied_volatility(),
        }
    }

    /// Solver with explicit tolerance and iteration limit.
    pub fn with_config(config: SolverConfig<f64>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<f64> {
        &self.config
    }

    /// Volatility σ > 0 at which the Black-Scholes premium equals `market_price`.
    ///
    /// # Errors
    /// - `InvalidParameter` for a non-positive spot, strike or expiry, or a
    ///   non-finite rate or premium
    /// - `ArbitrageViolation` if the premium lies outside [`premium_bounds`]
    ///   widened by [`BOUND_TOLERANCE`]
    /// - `ConvergenceFailure` if Newton exhausts its iterations, vega
    ///   vanishes, or an iterate leaves σ > 0
    #[allow(clippy::too_many_arguments)]
    pub fn solve(
        &self,
        option_type: OptionType,
        spot: f64,
        rate: f64,
        dividend: f64,
        expiry: f64,
        strike: f64,
        market_price: f64,
    ) -> Result<f64, PricingError> {
        InstrumentParams::new(spot, rate, expiry, strike, 0.0)?;
        if !dividend.is_finite() {
            return Err(InstrumentError::InvalidRate {
                name: "repo",
                value: dividend,
            }
            .into());
        }
        if !market_price.is_finite() {
            return Err(PricingError::InvalidParameter(format!(
                "market premium must be finite, got {}",
                market_price
            )));
        }

        let (lower, upper) = premium_bounds(option_type, spot, rate, dividend, expiry, strike);
        if market_price < lower - BOUND_TOLERANCE || market_price > upper + BOUND_TOLERANCE {
            return Err(PricingError::ArbitrageViolation {
                price: market_price,
                lower,
                upper,
            });
        }

        let model = BlackScholes::new(spot, rate, dividend, MIN_INITIAL_GUESS)?;
        let moneyness = (spot / strike).ln() + (rate - dividend) * expiry;
        let guess = (2.0 * (moneyness / expiry).abs()).sqrt().max(MIN_INITIAL_GUESS);

        let solver = NewtonRaphsonSolver::new(self.config);
        let sigma = solver.find_root_bounded(
            |sigma| {
                let (price, _) = model
                    .with_volatility(sigma)
                    .price_and_vega_positive(strike, expiry, option_type);
                price - market_price
            },
            |sigma| {
                let (_, vega) = model
                    .with_volatility(sigma)
                    .price_and_vega_positive(strike, expiry, option_type);
                vega
            },
            guess,
            0.0,
        )?;
        Ok(sigma)
    }
}

/// Implied volatility with the default solver settings.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
/// use pricer_models::analytical::implied_volatility;
/// use pricer_models::instruments::OptionType;
///
/// // A call can never be worth more than the discounted spot
/// let err = implied_volatility::solve(OptionType::Call, 2.0, 0.03, 0.0, 3.0, 2.0, 2.5).unwrap_err();
/// assert!(matches!(err, PricingError::ArbitrageViolation { .. }));
/// ```
pub fn solve(
    option_type: OptionType,
    spot: f64,
    rate: f64,
    dividend: f64,
    expiry: f64,
    strike: f64,
    market_price: f64,
) -> Result<f64, PricingError> {
    ImpliedVolatilitySolver::new().solve(
        option_type,
        spot,
        rate,
        dividend,
        expiry,
        strike,
        market_price,
    )
}
