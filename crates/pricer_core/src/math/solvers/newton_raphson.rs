//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root, meaning the number
/// of correct digits approximately doubles each iteration. However, it may
/// fail if:
/// - The derivative is near zero
/// - The initial guess is far from the root
/// - An iterate leaves the domain on which `f` is defined
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Arguments
    ///
    /// * `f` - Function to find root of
    /// * `f_prime` - Derivative of f
    /// * `x0` - Initial guess
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(SolverError::NumericalInstability)` - Iterate became non-finite
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let root = solver.find_root(f, f_prime, 1.5).unwrap();
    /// assert!((f(root)).abs() < 1e-10);
    /// ```
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.iterate(f, f_prime, x0, None)
    }

    /// Find a root of `f` restricted to the open half-line `x > lower`.
    ///
    /// `f` and `f_prime` are only ever evaluated at points strictly above
    /// `lower`. An initial guess or Newton update at or below the bound is
    /// reported as [`SolverError::OutOfDomain`] instead of being clamped.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    /// use pricer_core::types::SolverError;
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // ln(x) = 1 is only defined for x > 0
    /// let root = solver
    ///     .find_root_bounded(|x: f64| x.ln() - 1.0, |x: f64| 1.0 / x, 1.0, 0.0)
    ///     .unwrap();
    /// assert!((root - std::f64::consts::E).abs() < 1e-9);
    ///
    /// let err = solver
    ///     .find_root_bounded(|x: f64| x.ln() - 1.0, |x: f64| 1.0 / x, -1.0, 0.0)
    ///     .unwrap_err();
    /// assert!(matches!(err, SolverError::OutOfDomain { .. }));
    /// ```
    pub fn find_root_bounded<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        lower: T,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.iterate(f, f_prime, x0, Some(lower))
    }

    fn iterate<F, G>(&self, f: F, f_prime: G, x0: T, lower: Option<T>) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let epsilon = T::from(1e-30).unwrap_or_else(T::min_positive_value);
        let check_domain = |x: T| -> Result<(), SolverError> {
            match lower {
                Some(bound) if x <= bound || x.is_nan() => Err(SolverError::OutOfDomain {
                    x: x.to_f64().unwrap_or(f64::NAN),
                    lower: bound.to_f64().unwrap_or(f64::NAN),
                }),
                _ => Ok(()),
            }
        };

        let mut x = x0;
        check_domain(x)?;

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);

            // Check for convergence
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);

            // Check for near-zero derivative
            if f_prime_val.abs() < epsilon || f_prime_val.is_nan() {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            #[allow(clippy::assign_op_pattern)]
            {
                x = x - f_val / f_prime_val;
            }

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
            check_domain(x)?;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Convergence Tests
    // ========================================

    #[test]
    fn test_sqrt_2() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());

        let f = |x: f64| x * x - 2.0;
        let f_prime = |x: f64| 2.0 * x;

        let root = solver.find_root(f, f_prime, 1.0).unwrap();
        assert!(
            (root - std::f64::consts::SQRT_2).abs() < 1e-10,
            "Expected √2 ≈ {}, got {}",
            std::f64::consts::SQRT_2,
            root
        );
    }

    #[test]
    fn test_exp_minus_two() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());

        let f = |x: f64| x.exp() - 2.0;
        let f_prime = |x: f64| x.exp();

        let root = solver.find_root(f, f_prime, 0.0).unwrap();
        assert!((root - 2.0_f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn test_root_at_initial_guess_returns_immediately() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x - 3.0, |_x: f64| 0.0, 3.0).unwrap();
        assert_eq!(root, 3.0);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_derivative_near_zero() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());

        let f = |x: f64| x * x * x;
        let f_prime = |_x: f64| 0.0;

        let result = solver.find_root(f, f_prime, 0.5);
        match result.unwrap_err() {
            SolverError::DerivativeNearZero { .. } => {}
            other => panic!("Expected DerivativeNearZero error, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_derivative_is_rejected() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());
        let result = solver.find_root(|x: f64| x - 1.0, |_x: f64| f64::NAN, 0.0);
        assert!(matches!(
            result,
            Err(SolverError::DerivativeNearZero { .. })
        ));
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-100, 3));

        let f = |x: f64| x * x - 2.0;
        let f_prime = |x: f64| 2.0 * x;

        match solver.find_root(f, f_prime, 1.0).unwrap_err() {
            SolverError::MaxIterationsExceeded { iterations } => {
                assert_eq!(iterations, 3);
            }
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    #[test]
    fn test_bounded_rejects_update_below_bound() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());

        // f(x) = x - 1 from x0 = 5 with a steep fake derivative: the step
        // overshoots to x = 5 - 4 / 0.5 = -3.
        let f = |x: f64| x - 1.0;
        let f_prime = |_x: f64| 0.5;

        match solver.find_root_bounded(f, f_prime, 5.0, 0.0).unwrap_err() {
            SolverError::OutOfDomain { x, lower } => {
                assert!((x + 3.0).abs() < 1e-12);
                assert_eq!(lower, 0.0);
            }
            other => panic!("Expected OutOfDomain error, got {:?}", other),
        }
    }

    #[test]
    fn test_bounded_matches_unbounded_inside_domain() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::default());

        let f = |x: f64| x * x - 2.0;
        let f_prime = |x: f64| 2.0 * x;

        let unbounded = solver.find_root(f, f_prime, 1.0).unwrap();
        let bounded = solver.find_root_bounded(f, f_prime, 1.0, 0.0).unwrap();
        assert_eq!(unbounded, bounded);
    }

    #[test]
    fn test_config_accessor() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-8, 50));

        assert!((solver.config().tolerance - 1e-8).abs() < 1e-15);
        assert_eq!(solver.config().max_iterations, 50);
    }

    #[test]
    fn test_with_f32() {
        let solver: NewtonRaphsonSolver<f32> = NewtonRaphsonSolver::new(SolverConfig::new(1e-5, 50));

        let f = |x: f32| x * x - 2.0;
        let f_prime = |x: f32| 2.0 * x;

        let root = solver.find_root(f, f_prime, 1.0_f32).unwrap();
        assert!((root - std::f32::consts::SQRT_2).abs() < 1e-4);
    }
}
