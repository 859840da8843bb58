//! Knock-in/knock-out barrier options by quasi-Monte Carlo.
//!
//! Each path takes one scrambled Sobol point of dimension `n` (the number
//! of monitoring dates) and maps every coordinate through the inverse
//! normal CDF to a GBM increment. Batch `b` consumes the points with
//! indices `[b·batch_size, b·batch_size + len)`, so the point set is the
//! same however the batches are scheduled.
//!
//! Path payoff, with `t_i = i·T/n`:
//!
//! ```text
//! first i with S(t_i) ≥ U   →  rebate·e^(−r·t_i)
//! else min S(t_i) ≤ L       →  max(K − S(T), 0)·e^(−rT)
//! else                      →  0
//! ```

use pricer_core::types::PricingError;
use pricer_models::analytical::norm_inv_cdf;
use pricer_models::instruments::KikoOption;
use tracing::debug;

use crate::mc::{check_paths, run_batches, GbmParams, MonteCarloConfig, PairAccumulator, Z_95};
use crate::rng::{LowDiscrepancySequence, SobolSequence};

/// Relative spot bump for [`KikoPricer::delta`].
pub const RELATIVE_BUMP: f64 = 0.01;

/// Smallest default spot bump.
pub const MIN_BUMP: f64 = 0.01;

/// Largest default spot bump as a fraction of the spot.
pub const MAX_RELATIVE_BUMP: f64 = 0.5;

/// Quasi-Monte Carlo price of a KIKO option with its 95% interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KikoEstimate {
    /// Present value estimate.
    pub price: f64,
    /// Lower end of the 95% confidence interval.
    pub ci_low: f64,
    /// Upper end of the 95% confidence interval.
    pub ci_high: f64,
}

impl KikoEstimate {
    fn from_accumulator(acc: &PairAccumulator) -> Self {
        let estimate = acc.plain_estimate();
        let half_width = Z_95 * estimate.std_error;
        Self {
            price: estimate.price,
            ci_low: estimate.price - half_width,
            ci_high: estimate.price + half_width,
        }
    }
}

/// Pricer for [`KikoOption`].
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{InstrumentParams, KikoOption};
/// use pricer_pricing::path_dependent::KikoPricer;
///
/// let params = InstrumentParams::new(100.0, 0.05, 2.0, 100.0, 0.2).unwrap();
/// let option = KikoOption::new(params, 80.0, 125.0, 24, 1.5, 20_000).unwrap();
///
/// let pricer = KikoPricer::new(option);
/// let estimate = pricer.price(42).unwrap();
/// assert!(estimate.ci_low <= estimate.price && estimate.price <= estimate.ci_high);
///
/// // Same seed, same point set
/// assert_eq!(pricer.price(42).unwrap(), estimate);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct KikoPricer {
    option: KikoOption,
    config: MonteCarloConfig,
    bump: Option<f64>,
}

impl KikoPricer {
    /// Creates a pricer with the default Monte Carlo configuration and bump.
    pub fn new(option: KikoOption) -> Self {
        Self {
            option,
            config: MonteCarloConfig::default(),
            bump: None,
        }
    }

    /// Replaces the Monte Carlo configuration. Its seed is ignored.
    pub fn with_config(self, config: MonteCarloConfig) -> Self {
        Self { config, ..self }
    }

    /// Sets an absolute spot bump for [`delta`](Self::delta).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `bump` is positive, finite and below the spot.
    pub fn with_bump(self, bump: f64) -> Result<Self, PricingError> {
        let spot = self.option.params().spot();
        if !(bump > 0.0 && bump.is_finite() && bump < spot) {
            return Err(PricingError::InvalidParameter(format!(
                "delta bump must lie in (0, {}), got {}",
                spot, bump
            )));
        }
        Ok(Self {
            bump: Some(bump),
            ..self
        })
    }

    /// Spot bump used by [`delta`](Self::delta).
    ///
    /// Defaults to `max(0.01·S₀, 0.01)`, capped at `S₀/2` so the
    /// bumped-down spot stays positive.
    pub fn bump(&self) -> f64 {
        self.bump.unwrap_or_else(|| {
            let spot = self.option.params().spot();
            (RELATIVE_BUMP * spot)
                .max(MIN_BUMP)
                .min(MAX_RELATIVE_BUMP * spot)
        })
    }

    /// Number of paths this pricer simulates.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.config.resolve_paths(self.option.paths())
    }

    /// Prices the option on the Sobol point set scrambled with `seed`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the path count, configuration or number of
    /// monitoring dates is unusable.
    pub fn price(&self, seed: u64) -> Result<KikoEstimate, PricingError> {
        let acc = simulate(&self.option, &self.config, seed)?;
        let estimate = KikoEstimate::from_accumulator(&acc);
        debug!(
            price = estimate.price,
            ci_low = estimate.ci_low,
            ci_high = estimate.ci_high,
            "KIKO estimate"
        );
        Ok(estimate)
    }

    /// Central-difference delta `(V(S₀+ε) − V(S₀−ε)) / 2ε`.
    ///
    /// Both legs run on the identical scrambled point set, so the
    /// difference carries no independent sampling noise.
    ///
    /// # Errors
    ///
    /// As for [`price`](Self::price), plus `InvalidParameter` when the
    /// bumped-down spot is not positive.
    pub fn delta(&self, seed: u64) -> Result<f64, PricingError> {
        let bump = self.bump();
        let spot = self.option.params().spot();
        let up = self.option.with_spot(spot + bump)?;
        let down = self.option.with_spot(spot - bump)?;

        let v_up = simulate(&up, &self.config, seed)?.mean_x();
        let v_down = simulate(&down, &self.config, seed)?.mean_x();
        let delta = (v_up - v_down) / (2.0 * bump);

        debug!(bump, v_up, v_down, delta, "KIKO delta");
        Ok(delta)
    }
}

/// Contract terms needed to value one monitored path.
#[derive(Clone, Copy, Debug)]
struct BarrierTerms {
    lower: f64,
    upper: f64,
    strike: f64,
    rebate: f64,
    rate: f64,
    dt: f64,
    discount: f64,
}

impl BarrierTerms {
    fn new(option: &KikoOption) -> Self {
        let params = option.params();
        Self {
            lower: option.lower_barrier(),
            upper: option.upper_barrier(),
            strike: params.strike(),
            rebate: option.rebate(),
            rate: params.rate(),
            dt: params.expiry() / option.observations() as f64,
            discount: params.discount_factor(),
        }
    }

    /// Discounted payoff of the path starting at `log_spot` and moved by
    /// one log increment per monitoring date.
    fn path_payoff<I>(&self, log_spot: f64, increments: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        let mut log_price = log_spot;
        let mut min_price = f64::INFINITY;

        for (i, increment) in increments.into_iter().enumerate() {
            log_price += increment;
            let price = log_price.exp();
            // Knock-out wins over any earlier knock-in
            if price >= self.upper {
                return self.rebate * (-self.rate * (i + 1) as f64 * self.dt).exp();
            }
            min_price = min_price.min(price);
        }

        if min_price <= self.lower {
            self.discount * (self.strike - log_price.exp()).max(0.0)
        } else {
            0.0
        }
    }
}

fn simulate(
    option: &KikoOption,
    config: &MonteCarloConfig,
    seed: u64,
) -> Result<PairAccumulator, PricingError> {
    config.validate()?;
    let n_paths = config.resolve_paths(option.paths());
    check_paths(n_paths)?;

    let observations = option.observations();
    let sequence = SobolSequence::scrambled(observations, seed)?;
    let params = option.params();
    let gbm = GbmParams::from_params(params);
    let (drift_dt, vol_sqrt_dt) = gbm.step_terms(observations);
    let terms = BarrierTerms::new(option);
    let log_spot = params.spot().ln();

    debug!(
        instrument = "kiko",
        n_paths,
        observations,
        batches = config.batch_count(n_paths),
        seed,
        spot = params.spot(),
        "starting quasi-Monte Carlo run"
    );

    Ok(run_batches(config, n_paths, |batch| {
        let mut sobol = sequence.clone();
        sobol.skip_to(batch.start);
        let mut acc = PairAccumulator::new();

        for _ in 0..batch.len {
            let point = sobol.next_point();
            let payoff = terms.path_payoff(
                log_spot,
                point
                    .iter()
                    .map(|&u| drift_dt + vol_sqrt_dt * norm_inv_cdf(u)),
            );
            acc.push(payoff, 0.0);
        }
        acc
    }))
}
