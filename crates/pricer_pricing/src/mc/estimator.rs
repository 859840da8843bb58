//! Streaming estimators for Monte Carlo output.
//!
//! [`PairAccumulator`] keeps running moments of a target payoff `X` and a
//! control payoff `Y` using Welford's update, and merges partial results
//! with Chan's pairwise formula. Batches are accumulated independently and
//! merged in batch order, so the final moments do not depend on how the
//! batches were scheduled.
//!
//! With a control whose expectation `E[Y]` is known, the regression
//! estimator is
//!
//! ```text
//! θ = Cov(X, Y) / Var(Y)
//! Z̄ = X̄ − θ·(Ȳ − E[Y])
//! Var(Z) = Var(X) − 2θ·Cov(X, Y) + θ²·Var(Y)
//! ```

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// Monte Carlo price estimate with its sampling error.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::McEstimate;
///
/// let estimate = McEstimate::from_moments(10.0, 4.0, 400);
/// assert!((estimate.std_error - 0.1).abs() < 1e-12);
/// let (low, high) = estimate.confidence_interval;
/// assert!((high - low - 2.0 * 1.96 * 0.1).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McEstimate {
    /// Present value estimate.
    pub price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// 95% confidence interval `(low, high)`.
    pub confidence_interval: (f64, f64),
    /// Number of simulated paths.
    pub n_paths: usize,
}

impl McEstimate {
    /// Builds an estimate from a sample mean and unbiased sample variance.
    pub fn from_moments(mean: f64, variance: f64, n_paths: usize) -> Self {
        let std_error = if n_paths > 0 {
            (variance.max(0.0) / n_paths as f64).sqrt()
        } else {
            0.0
        };
        let half_width = Z_95 * std_error;
        Self {
            price: mean,
            std_error,
            confidence_interval: (mean - half_width, mean + half_width),
            n_paths,
        }
    }

    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn half_width(&self) -> f64 {
        Z_95 * self.std_error
    }

    /// Whether `value` lies inside the 95% confidence interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        let (low, high) = self.confidence_interval;
        (low..=high).contains(&value)
    }
}

/// Running first and second moments of a payoff pair `(X, Y)`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PairAccumulator;
///
/// let mut left = PairAccumulator::new();
/// let mut right = PairAccumulator::new();
/// let mut all = PairAccumulator::new();
/// for i in 0..10 {
///     let (x, y) = (i as f64, (i * i) as f64);
///     if i < 4 { left.push(x, y) } else { right.push(x, y) }
///     all.push(x, y);
/// }
/// left.merge(&right);
/// assert_eq!(left.count(), all.count());
/// assert!((left.covariance() - all.covariance()).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PairAccumulator {
    n: u64,
    mean_x: f64,
    mean_y: f64,
    m2_x: f64,
    m2_y: f64,
    c_xy: f64,
}

impl PairAccumulator {
    /// Empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    #[inline]
    pub fn push(&mut self, x: f64, y: f64) {
        self.n += 1;
        let n = self.n as f64;
        let dx = x - self.mean_x;
        let dy = y - self.mean_y;
        self.mean_x += dx / n;
        self.mean_y += dy / n;
        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * (y - self.mean_y);
        self.c_xy += dx * (y - self.mean_y);
    }

    /// Folds `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = *other;
            return;
        }

        let na = self.n as f64;
        let nb = other.n as f64;
        let n = na + nb;
        let dx = other.mean_x - self.mean_x;
        let dy = other.mean_y - self.mean_y;
        let weight = na * nb / n;

        self.mean_x += dx * nb / n;
        self.mean_y += dy * nb / n;
        self.m2_x += other.m2_x + dx * dx * weight;
        self.m2_y += other.m2_y + dy * dy * weight;
        self.c_xy += other.c_xy + dx * dy * weight;
        self.n += other.n;
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> u64 {
        self.n
    }

    /// Sample mean of `X`.
    #[inline]
    pub fn mean_x(&self) -> f64 {
        self.mean_x
    }

    /// Sample mean of `Y`.
    #[inline]
    pub fn mean_y(&self) -> f64 {
        self.mean_y
    }

    #[inline]
    fn denominator(&self) -> Option<f64> {
        (self.n > 1).then(|| (self.n - 1) as f64)
    }

    /// Unbiased sample variance of `X` (0 for fewer than two samples).
    #[inline]
    pub fn variance_x(&self) -> f64 {
        self.denominator().map_or(0.0, |d| self.m2_x / d)
    }

    /// Unbiased sample variance of `Y` (0 for fewer than two samples).
    #[inline]
    pub fn variance_y(&self) -> f64 {
        self.denominator().map_or(0.0, |d| self.m2_y / d)
    }

    /// Unbiased sample covariance of `X` and `Y`.
    #[inline]
    pub fn covariance(&self) -> f64 {
        self.denominator().map_or(0.0, |d| self.c_xy / d)
    }

    /// Regression coefficient `Cov(X, Y) / Var(Y)`, 0 when `Y` is constant.
    #[inline]
    pub fn theta(&self) -> f64 {
        if self.m2_y > 0.0 {
            self.c_xy / self.m2_y
        } else {
            0.0
        }
    }

    /// Plain estimate of `E[X]`.
    pub fn plain_estimate(&self) -> McEstimate {
        McEstimate::from_moments(self.mean_x, self.variance_x(), self.n as usize)
    }

    /// Control-variate estimate of `E[X]` given the exact `E[Y]`.
    pub fn control_variate_estimate(&self, expected_y: f64) -> McEstimate {
        let theta = self.theta();
        let mean = self.mean_x - theta * (self.mean_y - expected_y);
        let variance = self.variance_x() - 2.0 * theta * self.covariance()
            + theta * theta * self.variance_y();
        McEstimate::from_moments(mean, variance, self.n as usize)
    }
}
