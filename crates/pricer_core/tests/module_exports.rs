//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

use proptest::prelude::*;

/// Test that solver types are accessible via absolute path.
#[test]
fn test_solver_module_exports() {
    use pricer_core::math::solvers::NewtonRaphsonSolver;
    use pricer_core::math::solvers::SolverConfig;

    let solver = NewtonRaphsonSolver::new(SolverConfig::<f64>::implied_volatility());
    let root = solver
        .find_root_bounded(|x| x * x - 0.04, |x| 2.0 * x, 0.5, 0.0)
        .unwrap();
    assert!((root - 0.2).abs() < 1e-5);
}

/// Test that trait module is accessible via absolute path.
#[test]
fn test_traits_module_exports() {
    use pricer_core::traits::Float;
    use pricer_core::traits::Priceable;
    use pricer_core::types::error::PricingError;

    struct Constant {
        value: f64,
    }

    impl Priceable for Constant {
        fn price(&self) -> Result<f64, PricingError> {
            if self.value.is_finite() {
                Ok(self.value)
            } else {
                Err(PricingError::DegenerateInput("non-finite".to_string()))
            }
        }
    }

    assert_eq!(Constant { value: 1.5 }.price(), Ok(1.5));
    assert!(Constant { value: f64::NAN }.price().is_err());

    fn halve<T: Float>(x: T) -> T {
        x / (T::one() + T::one())
    }
    assert_eq!(halve(3.0_f64), 1.5);
}

/// Test that error types are re-exported at `types` level.
#[test]
fn test_error_reexports() {
    use pricer_core::types::{PricingError, SolverError};

    let err: PricingError = SolverError::DerivativeNearZero { x: 0.0 }.into();
    assert_eq!(err.kind(), "convergence_failure");
}

proptest! {
    /// Newton on x² = a from x0 = max(a, 1) always stays positive and converges.
    #[test]
    fn prop_bounded_sqrt_converges(a in 1e-4_f64..1e4) {
        use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};

        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-9 * a.max(1.0), 200));
        let root = solver
            .find_root_bounded(|x| x * x - a, |x| 2.0 * x, a.max(1.0), 0.0)
            .unwrap();
        prop_assert!((root * root - a).abs() < 1e-8 * a.max(1.0));
    }
}
