//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path generation
//! in log space, and correlated terminal draws for several assets.
//!
//! # Single asset
//!
//! With `n` equally spaced observations `t_i = i·T/n` the log price is the
//! cumulative sum of increments `(r − ½σ²)dt + σ√dt·Z_i`, exponentiated
//! against `S₀`.
//!
//! # Several assets
//!
//! Independent normals are correlated through the lower Cholesky factor
//! `L` of the constant-correlation matrix (`Z = L·W`). For two assets this
//! is `Z₂ = ρZ₁ + √(1−ρ²)·W₂`.

use pricer_models::instruments::InstrumentParams;

use super::error::ConfigError;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.2, 1.0);
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r) - annualised.
    pub rate: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Time to maturity (T) - in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// GBM dynamics matching validated instrument parameters.
    #[inline]
    pub fn from_params(params: &InstrumentParams) -> Self {
        Self::new(
            params.spot(),
            params.rate(),
            params.volatility(),
            params.expiry(),
        )
    }

    /// Validates the parameters.
    ///
    /// `true` if all parameters are valid (finite, non-negative where required).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.spot > 0.0
            && self.spot.is_finite()
            && self.rate.is_finite()
            && self.volatility >= 0.0
            && self.volatility.is_finite()
            && self.maturity > 0.0
            && self.maturity.is_finite()
    }

    /// Per-step log drift and diffusion scale `((r − ½σ²)dt, σ√dt)`.
    #[inline]
    pub fn step_terms(&self, steps: usize) -> (f64, f64) {
        let dt = self.maturity / steps as f64;
        (
            (self.rate - 0.5 * self.volatility * self.volatility) * dt,
            self.volatility * dt.sqrt(),
        )
    }
}

/// Fills `path` with the prices at the observation dates driven by `normals`.
///
/// `path[i]` is the price at `t_{i+1}`; `normals` and `path` have equal length.
/// Returns the average log price over the observations, from which the
/// geometric mean follows without a second pass.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{fill_gbm_path, GbmParams};
///
/// // Zero shocks and zero volatility grow the spot at the risk-free rate
/// let params = GbmParams::new(100.0, 0.05, 0.0, 1.0);
/// let mut path = [0.0; 4];
/// fill_gbm_path(&params, &[0.0; 4], &mut path);
/// assert!((path[3] - 100.0 * 0.05_f64.exp()).abs() < 1e-10);
/// ```
pub fn fill_gbm_path(params: &GbmParams, normals: &[f64], path: &mut [f64]) -> f64 {
    debug_assert_eq!(normals.len(), path.len());
    let (drift_dt, vol_sqrt_dt) = params.step_terms(path.len());
    let log_spot = params.spot.ln();

    let mut log_price = log_spot;
    let mut log_sum = 0.0;
    for (price, &z) in path.iter_mut().zip(normals) {
        log_price += drift_dt + vol_sqrt_dt * z;
        log_sum += log_price;
        *price = log_price.exp();
    }

    if path.is_empty() {
        log_spot
    } else {
        log_sum / path.len() as f64
    }
}

/// Lower Cholesky factor of an `n × n` constant-correlation matrix.
///
/// Semidefinite matrices (`ρ = 1` or `ρ = −1/(n−1)`) are factored with
/// zero pivots, leaving the dependent columns empty.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::CorrelationFactor;
///
/// let factor = CorrelationFactor::constant(2, 0.6).unwrap();
/// let mut z = [0.0; 2];
/// factor.correlate(&[1.0, 1.0], &mut z);
/// assert!((z[0] - 1.0).abs() < 1e-15);
/// assert!((z[1] - (0.6 + 0.8)).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationFactor {
    dimension: usize,
    /// Row-major lower triangle, `dimension²` entries.
    lower: Vec<f64>,
}

impl CorrelationFactor {
    /// Factors the matrix with unit diagonal and `correlation` elsewhere.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` if the matrix is not positive
    /// semidefinite, i.e. `correlation ∉ [−1/(n−1), 1]`.
    pub fn constant(dimension: usize, correlation: f64) -> Result<Self, ConfigError> {
        let min = if dimension > 1 {
            -1.0 / (dimension - 1) as f64
        } else {
            -1.0
        };
        if dimension == 0 || !(min..=1.0).contains(&correlation) {
            return Err(ConfigError::InvalidParameter {
                name: "correlation",
                value: format!(
                    "{} is outside [{}, 1] for {} assets",
                    correlation, min, dimension
                ),
            });
        }

        // Tolerance on the squared pivot for the semidefinite edge cases
        const PIVOT_EPS: f64 = 1e-12;

        let n = dimension;
        let mut lower = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..=i {
                let target = if i == j { 1.0 } else { correlation };
                let dot: f64 = (0..j).map(|k| lower[i * n + k] * lower[j * n + k]).sum();
                if i == j {
                    let pivot = target - dot;
                    lower[i * n + i] = if pivot > PIVOT_EPS { pivot.sqrt() } else { 0.0 };
                } else {
                    let pivot = lower[j * n + j];
                    lower[i * n + j] = if pivot > 0.0 {
                        (target - dot) / pivot
                    } else {
                        0.0
                    };
                }
            }
        }

        Ok(Self { dimension, lower })
    }

    /// Number of assets.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Entry `(i, j)` of the factor.
    #[inline]
    pub fn entry(&self, i: usize, j: usize) -> f64 {
        self.lower[i * self.dimension + j]
    }

    /// Writes `L·independent` into `correlated`.
    #[inline]
    pub fn correlate(&self, independent: &[f64], correlated: &mut [f64]) {
        let n = self.dimension;
        for (i, out) in correlated.iter_mut().enumerate().take(n) {
            let row = &self.lower[i * n..i * n + i + 1];
            *out = row.iter().zip(independent).map(|(l, w)| l * w).sum();
        }
    }
}

/// Terminal prices `S_i(T) = S_i·exp((r − ½σ_i²)T + σ_i√T·Z_i)`.
///
/// Returns the average log terminal price.
pub fn fill_terminal_prices(
    spots: &[f64],
    volatilities: &[f64],
    rate: f64,
    expiry: f64,
    correlated: &[f64],
    prices: &mut [f64],
) -> f64 {
    let sqrt_t = expiry.sqrt();
    let mut log_sum = 0.0;
    for (((price, &spot), &vol), &z) in prices
        .iter_mut()
        .zip(spots)
        .zip(volatilities)
        .zip(correlated)
    {
        let log_price = spot.ln() + (rate - 0.5 * vol * vol) * expiry + vol * sqrt_t * z;
        log_sum += log_price;
        *price = log_price.exp();
    }
    log_sum / spots.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PricerRng;
    use approx::assert_relative_eq;

    #[test]
    fn test_gbm_params_validation() {
        assert!(GbmParams::new(100.0, 0.05, 0.2, 1.0).is_valid());
        assert!(!GbmParams::new(-100.0, 0.05, 0.2, 1.0).is_valid());
        assert!(!GbmParams::new(100.0, 0.05, -0.2, 1.0).is_valid());
        assert!(!GbmParams::new(100.0, 0.05, 0.2, 0.0).is_valid());
    }

    #[test]
    fn test_from_params() {
        let params = InstrumentParams::new(90.0, 0.03, 2.0, 100.0, 0.25).unwrap();
        let gbm = GbmParams::from_params(&params);
        assert_eq!(gbm, GbmParams::new(90.0, 0.03, 0.25, 2.0));
    }

    #[test]
    fn test_path_cumulates_log_increments() {
        let params = GbmParams::new(100.0, 0.05, 0.2, 1.0);
        let normals = [0.5, -1.0, 0.25, 2.0];
        let mut path = [0.0; 4];
        let mean_log = fill_gbm_path(&params, &normals, &mut path);

        let (drift, vol) = params.step_terms(4);
        let mut log_price = 100.0_f64.ln();
        let mut logs = Vec::new();
        for (i, z) in normals.iter().enumerate() {
            log_price += drift + vol * z;
            logs.push(log_price);
            assert_relative_eq!(path[i], log_price.exp(), epsilon = 1e-10);
        }
        assert_relative_eq!(mean_log, logs.iter().sum::<f64>() / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        let params = GbmParams::new(100.0, 0.05, 0.3, 2.0);
        let mut rng = PricerRng::from_seed(11);
        let steps = 8;
        let n = 100_000;
        let mut normals = vec![0.0; steps];
        let mut path = vec![0.0; steps];
        let mut sum = 0.0;
        for _ in 0..n {
            rng.fill_normal(&mut normals);
            fill_gbm_path(&params, &normals, &mut path);
            sum += path[steps - 1];
        }
        let mean = sum / n as f64;
        let forward = 100.0 * (0.05_f64 * 2.0).exp();
        // Terminal std ≈ 48; 4 standard errors ≈ 0.6
        assert!((mean - forward).abs() < 0.6, "mean = {}, forward = {}", mean, forward);
    }

    #[test]
    fn test_cholesky_two_assets() {
        let factor = CorrelationFactor::constant(2, 0.3).unwrap();
        assert_relative_eq!(factor.entry(0, 0), 1.0);
        assert_relative_eq!(factor.entry(1, 0), 0.3);
        assert_relative_eq!(factor.entry(1, 1), (1.0_f64 - 0.09).sqrt(), epsilon = 1e-15);
        assert_eq!(factor.entry(0, 1), 0.0);
    }

    #[test]
    fn test_cholesky_reproduces_matrix() {
        let n = 5;
        let rho = 0.35;
        let factor = CorrelationFactor::constant(n, rho).unwrap();
        for i in 0..n {
            for j in 0..n {
                let product: f64 = (0..n).map(|k| factor.entry(i, k) * factor.entry(j, k)).sum();
                let expected = if i == j { 1.0 } else { rho };
                assert_relative_eq!(product, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_cholesky_semidefinite_edges() {
        // ρ = 1: every asset follows the first shock
        let factor = CorrelationFactor::constant(3, 1.0).unwrap();
        let mut z = [0.0; 3];
        factor.correlate(&[0.7, -2.0, 5.0], &mut z);
        for value in z {
            assert_relative_eq!(value, 0.7, epsilon = 1e-12);
        }

        // ρ = −1/(n−1): shocks sum to zero
        let factor = CorrelationFactor::constant(3, -0.5).unwrap();
        factor.correlate(&[0.3, 1.1, -0.4], &mut z);
        assert!(z.iter().all(|v| v.is_finite()));
        assert_relative_eq!(z.iter().sum::<f64>(), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_cholesky_rejects_infeasible_correlation() {
        assert!(CorrelationFactor::constant(3, -0.6).is_err());
        assert!(CorrelationFactor::constant(2, 1.1).is_err());
        assert!(CorrelationFactor::constant(0, 0.0).is_err());
    }

    #[test]
    fn test_sample_correlation() {
        let factor = CorrelationFactor::constant(2, -0.4).unwrap();
        let mut rng = PricerRng::from_seed(5);
        let n = 100_000;
        let mut w = [0.0; 2];
        let mut z = [0.0; 2];
        let mut sum_prod = 0.0;
        for _ in 0..n {
            rng.fill_normal(&mut w);
            factor.correlate(&w, &mut z);
            sum_prod += z[0] * z[1];
        }
        assert!((sum_prod / n as f64 + 0.4).abs() < 0.02);
    }

    #[test]
    fn test_terminal_prices_zero_shock() {
        let mut prices = [0.0; 2];
        let mean_log = fill_terminal_prices(
            &[100.0, 50.0],
            &[0.2, 0.4],
            0.05,
            1.0,
            &[0.0, 0.0],
            &mut prices,
        );
        assert_relative_eq!(prices[0], 100.0 * (0.05_f64 - 0.02).exp(), epsilon = 1e-10);
        assert_relative_eq!(prices[1], 50.0 * (0.05_f64 - 0.08).exp(), epsilon = 1e-10);
        assert_relative_eq!(mean_log, (prices[0].ln() + prices[1].ln()) / 2.0, epsilon = 1e-12);
    }
}
