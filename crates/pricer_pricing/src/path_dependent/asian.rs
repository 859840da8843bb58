//! Arithmetic-average Asian options by Monte Carlo.
//!
//! Each path is observed at `t_i = i·T/n`, `i = 1..=n`. Per path the
//! pricer records
//!
//! - `X = e^(−rT)·payoff(arithmetic mean)` (target)
//! - `Y = e^(−rT)·payoff(geometric mean)` (control)
//!
//! and, with [`ControlVariate::Geometric`], corrects the mean of `X` by the
//! known Kemna-Vorst price of `Y`.

use pricer_core::types::PricingError;
use pricer_models::analytical::geometric_asian_price;
use pricer_models::instruments::{ArithmeticAsianOption, ControlVariate};
use tracing::debug;

use crate::mc::{
    check_paths, fill_gbm_path, run_batches, GbmParams, McEstimate, MonteCarloConfig,
    PairAccumulator,
};
use crate::rng::PricerRng;

/// Monte Carlo pricer for arithmetic-average Asian options.
///
/// # Examples
///
/// ```rust
/// use pricer_models::analytical::geometric_asian_price;
/// use pricer_models::instruments::{
///     ArithmeticAsianOption, ControlVariate, InstrumentParams, OptionType,
/// };
/// use pricer_pricing::mc::MonteCarloConfig;
/// use pricer_pricing::path_dependent::ArithmeticAsianPricer;
///
/// let params = InstrumentParams::new(100.0, 0.05, 3.0, 100.0, 0.3).unwrap();
/// let option = ArithmeticAsianOption::new(
///     params, 50, 20_000, ControlVariate::Geometric, OptionType::Call,
/// ).unwrap();
///
/// let config = MonteCarloConfig::builder().seed(7).build().unwrap();
/// let estimate = ArithmeticAsianPricer::new(option, config).price().unwrap();
///
/// // The arithmetic mean dominates the geometric mean path by path
/// let geometric = geometric_asian_price(&option.geometric()).unwrap();
/// assert!(estimate.price > geometric);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ArithmeticAsianPricer {
    option: ArithmeticAsianOption,
    config: MonteCarloConfig,
}

impl ArithmeticAsianPricer {
    /// Creates a pricer for `option` under `config`.
    pub fn new(option: ArithmeticAsianOption, config: MonteCarloConfig) -> Self {
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
    /// - `InvalidParameter` if the path count or configuration is invalid
    /// - `DegenerateInput` with the geometric control and σ = 0, where the
    ///   control's closed form is undefined
    pub fn price(&self) -> Result<McEstimate, PricingError> {
        let control = match self.option.control_variate() {
            ControlVariate::Geometric => Some(geometric_asian_price(&self.option.geometric())?),
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
            "arithmetic Asian estimate"
        );
        Ok(estimate)
    }

    /// Simulates every path and returns the raw `(X, Y)` moments.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the path count or configuration is invalid.
    pub fn simulate(&self) -> Result<PairAccumulator, PricingError> {
        self.config.validate()?;
        let n_paths = self.n_paths();
        check_paths(n_paths)?;

        let params = self.option.params();
        let gbm = GbmParams::from_params(params);
        let observations = self.option.observations();
        let strike = params.strike();
        let discount = params.discount_factor();
        let option_type = self.option.option_type();
        let seed = self.config.seed();

        debug!(
            instrument = "arithmetic_asian",
            n_paths,
            observations,
            batches = self.config.batch_count(n_paths),
            seed,
            control = %self.option.control_variate(),
            "starting Monte Carlo run"
        );

        Ok(run_batches(&self.config, n_paths, |batch| {
            let mut rng = PricerRng::for_stream(seed, batch.index);
            let mut normals = vec![0.0; observations];
            let mut path = vec![0.0; observations];
            let mut acc = PairAccumulator::new();

            for _ in 0..batch.len {
                rng.fill_normal(&mut normals);
                let mean_log = fill_gbm_path(&gbm, &normals, &mut path);
                let arithmetic = path.iter().sum::<f64>() / observations as f64;
                let geometric = mean_log.exp();
                acc.push(
                    discount * option_type.payoff(arithmetic, strike),
                    discount * option_type.payoff(geometric, strike),
                );
            }
            acc
        }))
    }
}
