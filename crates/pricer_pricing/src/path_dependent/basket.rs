//! Arithmetic-mean basket options by Monte Carlo.
//!
//! Terminal prices of all assets are drawn jointly with constant pairwise
//! correlation. The geometric mean of the same draw gives the control
//! payoff, whose exact expectation is the geometric basket closed form.

use pricer_core::types::PricingError;
use pricer_models::analytical::geometric_basket_price;
use pricer_models::instruments::{ArithmeticBasketOption, ControlVariate};
use tracing::debug;

use crate::mc::{
    check_paths, fill_terminal_prices, run_batches, CorrelationFactor, McEstimate,
    MonteCarloConfig, PairAccumulator,
};
use crate::rng::PricerRng;

/// Monte Carlo pricer for arithmetic-mean basket options.
#[derive(Clone, Debug)]
pub struct ArithmeticBasketPricer {
    option: ArithmeticBasketOption,
    config: MonteCarloConfig,
}

impl ArithmeticBasketPricer {
    /// Creates a pricer for `option` under `config`.
    pub fn new(option: ArithmeticBasketOption, config: MonteCarloConfig) -> Self {
        Self { option, config }
    }

    /// Number of paths this pricer simulates.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.config.resolve_paths(self.option.paths())
    }

    /// Prices the option.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the path count, configuration or correlation
    ///   is unusable
    /// - `DegenerateInput` with the geometric control when the basket
    ///   variance vanishes
    pub fn price(&self) -> Result<McEstimate, PricingError> {
        let control = match self.option.control_variate() {
            ControlVariate::Geometric => Some(geometric_basket_price(&self.option.geometric())?),
            ControlVariate::None => None,
        };

        let acc = self.simulate()?;
        let estimate = match control {
            Some(expected) => acc.control_variate_estimate(expected),
            None => acc.plain_estimate(),
        };

        debug!(
            price = estimate.price,
            std_error = estimate.std_error,
            theta = acc.theta(),
            "arithmetic basket estimate"
        );
        Ok(estimate)
    }

    /// Simulates every path and returns the raw `(X, Y)` moments.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the path count, configuration or correlation
    /// is unusable.
    pub fn simulate(&self) -> Result<PairAccumulator, PricingError> {
        self.config.validate()?;
        let n_paths = self.n_paths();
        check_paths(n_paths)?;

        let basket = self.option.basket();
        let assets = basket.dimension();
        let factor = CorrelationFactor::constant(assets, basket.correlation())?;
        let spots = basket.spots();
        let vols = basket.volatilities();
        let (rate, expiry, strike) = (basket.rate(), basket.expiry(), basket.strike());
        let discount = basket.discount_factor();
        let option_type = self.option.option_type();
        let seed = self.config.seed();

        debug!(
            instrument = "arithmetic_basket",
            n_paths,
            assets,
            correlation = basket.correlation(),
            batches = self.config.batch_count(n_paths),
            seed,
            control = %self.option.control_variate(),
            "starting Monte Carlo run"
        );

        Ok(run_batches(&self.config, n_paths, |batch| {
            let mut rng = PricerRng::for_stream(seed, batch.index);
            let mut independent = vec![0.0; assets];
            let mut correlated = vec![0.0; assets];
            let mut prices = vec![0.0; assets];
            let mut acc = PairAccumulator::new();

            for _ in 0..batch.len {
                rng.fill_normal(&mut independent);
                factor.correlate(&independent, &mut correlated);
                let mean_log =
                    fill_terminal_prices(spots, vols, rate, expiry, &correlated, &mut prices);
                let arithmetic = prices.iter().sum::<f64>() / assets as f64;
                acc.push(
                    discount * option_type.payoff(arithmetic, strike),
                    discount * option_type.payoff(mean_log.exp(), strike),
                );
            }
            acc
        }))
    }
}
