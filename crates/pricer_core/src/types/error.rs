//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The four-way taxonomy every pricing entry point returns
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every public pricing operation in the workspace reports failure through
/// this enum. Each variant is raised at the point of detection, before any
/// formula consumes the offending value.
///
/// # Variants
/// - `InvalidParameter`: Non-positive spot/strike/expiry, mismatched vectors, unknown option side
/// - `ArbitrageViolation`: Premium outside the no-arbitrage bounds of an inversion
/// - `ConvergenceFailure`: Iteration exhausted, or lattice probability outside `[0, 1]`
/// - `DegenerateInput`: `σ·√T` is zero, leaving `d1`/`d2` undefined
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter("spot must be positive, got -1".to_string());
/// assert_eq!(format!("{}", err), "Invalid parameter: spot must be positive, got -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Input parameter outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Market premium violates the theoretical no-arbitrage bounds.
    #[error("Arbitrage violation: premium {price} is {} [{lower}, {upper}]", side_of(.price, .lower))]
    ArbitrageViolation {
        /// Observed premium
        price: f64,
        /// Theoretical lower bound
        lower: f64,
        /// Theoretical upper bound
        upper: f64,
    },

    /// Iterative method failed, or a discretisation is arbitrage-inconsistent.
    #[error("Convergence failure: {0}")]
    ConvergenceFailure(String),

    /// Input makes the closed-form expression undefined.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
}

fn side_of(price: &f64, lower: &f64) -> &'static str {
    if price < lower {
        "below the theoretical lower bound of"
    } else {
        "above the theoretical upper bound of"
    }
}

impl PricingError {
    /// Short machine-readable name of the error category.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    ///
    /// let err = PricingError::DegenerateInput("σ√T = 0".to_string());
    /// assert_eq!(err.kind(), "degenerate_input");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidParameter(_) => "invalid_parameter",
            PricingError::ArbitrageViolation { .. } => "arbitrage_violation",
            PricingError::ConvergenceFailure(_) => "convergence_failure",
            PricingError::DegenerateInput(_) => "degenerate_input",
        }
    }
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// Iterate left the admissible domain of the function.
    #[error("Iterate x = {x} left the domain (x > {lower} required)")]
    OutOfDomain {
        /// The offending iterate
        x: f64,
        /// Exclusive lower bound of the domain
        lower: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::ConvergenceFailure(err.to_string())
    }
}
