//! Cox-Ross-Rubinstein binomial lattice.
//!
//! ```text
//! dt = T/N,  u = e^(σ√dt),  d = 1/u,  p = (e^(r·dt) − d)/(u − d)
//! ```
//!
//! Node `j` of layer `i` (counted from the top) carries
//! `exp(ln S₀ + (i − 2j)·σ√dt)`. Nodes whose price exceeds `f64::MAX`
//! carry `f64::MAX`. Rolling back from the terminal payoff, each node takes
//! `max(e^(−r·dt)·[p·V_up + (1−p)·V_down], intrinsic)`.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_models::instruments::{AmericanOption, OptionType};
use tracing::debug;

/// Binomial tree for an [`AmericanOption`].
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{AmericanOption, InstrumentParams, OptionType};
/// use pricer_pricing::lattice::BinomialTree;
///
/// let params = InstrumentParams::new(50.0, 0.1, 0.4167, 50.0, 0.4).unwrap();
/// let option = AmericanOption::new(params, 500, OptionType::Put).unwrap();
/// let tree = BinomialTree::new(&option).unwrap();
///
/// let american = tree.price().unwrap();
/// assert!((american - 4.2832).abs() < 1e-3);
/// assert!(american > tree.price_european().unwrap());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinomialTree {
    log_spot: f64,
    log_up: f64,
    strike: f64,
    steps: usize,
    option_type: OptionType,
    up: f64,
    down: f64,
    probability: f64,
    discount: f64,
}

impl BinomialTree {
    /// Builds the lattice parameters for `option`.
    ///
    /// # Errors
    ///
    /// - `DegenerateInput` when σ = 0, which collapses `u` onto `d`
    /// - `ConvergenceFailure` when the risk-neutral probability leaves
    ///   `[0, 1]`, i.e. the step is too coarse for the rate
    pub fn new(option: &AmericanOption) -> Result<Self, PricingError> {
        let params = option.params();
        let steps = option.steps();
        let dt = params.expiry() / steps as f64;
        let vol_sqrt_dt = params.volatility() * dt.sqrt();
        if vol_sqrt_dt <= 0.0 {
            return Err(PricingError::DegenerateInput(format!(
                "binomial lattice needs σ√dt > 0, got {}",
                vol_sqrt_dt
            )));
        }

        let up = vol_sqrt_dt.exp();
        let down = 1.0 / up;
        let probability = ((params.rate() * dt).exp() - down) / (up - down);
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PricingError::ConvergenceFailure(format!(
                "risk-neutral probability {} is outside [0, 1]; use more than {} steps",
                probability, steps
            )));
        }

        debug!(
            instrument = "american",
            steps,
            up,
            probability,
            "binomial lattice built"
        );

        Ok(Self {
            log_spot: params.spot().ln(),
            log_up: vol_sqrt_dt,
            strike: params.strike(),
            steps,
            option_type: option.option_type(),
            up,
            down,
            probability,
            discount: (-params.rate() * dt).exp(),
        })
    }

    /// Up factor `u`.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down factor `d = 1/u`.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Risk-neutral up probability `p`.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Value with early exercise at every node.
    ///
    /// # Errors
    ///
    /// `ConvergenceFailure` if the rolled-back value is not finite.
    pub fn price(&self) -> Result<f64, PricingError> {
        self.roll_back(true)
    }

    /// Value of the European option on the same lattice.
    ///
    /// # Errors
    ///
    /// As for [`price`](Self::price).
    pub fn price_european(&self) -> Result<f64, PricingError> {
        self.roll_back(false)
    }

    /// Prices of layer `i`, top node first.
    fn layer(&self, i: usize) -> impl Iterator<Item = f64> {
        let log_top = self.log_spot + i as f64 * self.log_up;
        let log_step = 2.0 * self.log_up;
        let ln_max = f64::MAX.ln();
        // Leading nodes above f64::MAX
        let saturated = if log_top > ln_max {
            (((log_top - ln_max) / log_step).ceil() as usize).min(i + 1)
        } else {
            0
        };
        let ratio = self.down / self.up;
        let mut price = (log_top - saturated as f64 * log_step).exp().min(f64::MAX);

        std::iter::repeat(f64::MAX)
            .take(saturated)
            .chain((saturated..=i).map(move |_| {
                let current = price;
                price *= ratio;
                current
            }))
    }

    fn roll_back(&self, early_exercise: bool) -> Result<f64, PricingError> {
        let n = self.steps;
        let disc_p = self.discount * self.probability;
        let disc_q = self.discount * (1.0 - self.probability);

        let mut values: Vec<f64> = self
            .layer(n)
            .map(|price| self.option_type.payoff(price, self.strike))
            .collect();

        for i in (0..n).rev() {
            for (j, price) in self.layer(i).enumerate() {
                let continuation = disc_p * values[j] + disc_q * values[j + 1];
                values[j] = if early_exercise {
                    continuation.max(self.option_type.payoff(price, self.strike))
                } else {
                    continuation
                };
            }
        }

        let value = values[0];
        if !value.is_finite() {
            return Err(PricingError::ConvergenceFailure(format!(
                "binomial lattice value {} is not finite after {} steps",
                value, n
            )));
        }
        Ok(value)
    }
}

impl Priceable for BinomialTree {
    fn price(&self) -> Result<f64, PricingError> {
        BinomialTree::price(self)
    }
}
