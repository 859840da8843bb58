//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// // Preset used by implied volatility inversion
/// let iv: SolverConfig<f64> = SolverConfig::implied_volatility();
/// assert_eq!(iv.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance for root finding.
    ///
    /// The solver stops when `|f(x)| < tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::epsilon)
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: constant(1e-10),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Convergence tolerance (must be positive)
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`. Use
    /// [`SolverConfig::try_new`] for values coming from user input.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Fallible counterpart of [`SolverConfig::new`].
    ///
    /// Returns `None` when `tolerance` is not a positive finite number or
    /// `max_iterations` is zero.
    ///
    /// ```
    /// use pricer_core::math::solvers::SolverConfig;
    ///
    /// assert!(SolverConfig::try_new(1e-6_f64, 100).is_some());
    /// assert!(SolverConfig::try_new(0.0_f64, 100).is_none());
    /// assert!(SolverConfig::try_new(1e-6_f64, 0).is_none());
    /// ```
    pub fn try_new(tolerance: T, max_iterations: usize) -> Option<Self> {
        if tolerance > T::zero() && tolerance.is_finite() && max_iterations > 0 {
            Some(Self {
                tolerance,
                max_iterations,
            })
        } else {
            None
        }
    }

    /// Settings for inverting an option premium into volatility.
    ///
    /// Tolerance 1e-6 on the premium error and at most 100 iterations.
    pub fn implied_volatility() -> Self {
        Self {
            tolerance: constant(1e-6),
            max_iterations: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200);
        assert!((config.tolerance - 1e-12).abs() < 1e-17);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
    }

    #[test]
    fn test_try_new_rejects_non_finite_tolerance() {
        assert!(SolverConfig::try_new(f64::NAN, 10).is_none());
        assert!(SolverConfig::try_new(f64::INFINITY, 10).is_none());
        assert!(SolverConfig::try_new(-1e-8, 10).is_none());
    }

    #[test]
    fn test_implied_volatility_preset() {
        let config: SolverConfig<f64> = SolverConfig::implied_volatility();
        assert!((config.tolerance - 1e-6).abs() < 1e-18);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_config_copy() {
        let config1: SolverConfig<f64> = SolverConfig::default();
        let config2 = config1;
        assert_eq!(config1, config2);
    }
}
