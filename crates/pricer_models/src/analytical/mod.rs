//! Closed-form pricing formulas.
//!
//! This module provides:
//! - Black-Scholes with a repo yield, plus the Black forward kernel
//! - Kemna-Vorst geometric Asian and constant-correlation geometric basket
//! - Implied volatility inversion by Newton-Raphson
//!
//! ## Design Principles
//!
//! - **Typed failures**: zero `σ·√T` is reported as
//!   [`AnalyticalError::DegenerateVariance`] before any `Φ` evaluation
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod geometric;
pub mod implied_volatility;

// Re-export main types at module level
pub use black_scholes::{black_forward, BlackScholes};
pub use distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use geometric::{
    geometric_asian_moments, geometric_asian_price, geometric_basket_moments,
    geometric_basket_price,
};
pub use implied_volatility::{premium_bounds, ImpliedVolatilitySolver};
