//! Instrument error types.
//!
//! This module provides structured error handling for instrument
//! construction. Every variant maps onto
//! [`PricingError::InvalidParameter`].

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument construction errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Spot price is non-positive or non-finite.
    #[error("Invalid spot: S0 = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Strike price is non-positive or non-finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Time to expiry is non-positive or non-finite.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Volatility is negative or non-finite.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// A rate (risk-free or repo) is non-finite.
    #[error("Invalid {name} rate: {value}")]
    InvalidRate {
        /// Which rate
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// A step, observation or path count is zero.
    #[error("Invalid {name}: must be a positive integer, got {value}")]
    InvalidCount {
        /// Which count
        name: &'static str,
        /// The invalid value
        value: usize,
    },

    /// Basket spot and volatility vectors differ in length.
    #[error("Dimension mismatch: {spots} spots but {volatilities} volatilities")]
    DimensionMismatch {
        /// Number of spots supplied
        spots: usize,
        /// Number of volatilities supplied
        volatilities: usize,
    },

    /// Basket has fewer than two assets.
    #[error("Basket requires at least 2 assets, got {assets}")]
    InsufficientAssets {
        /// Number of assets supplied
        assets: usize,
    },

    /// Constant pairwise correlation outside the positive-semidefinite range.
    #[error("Invalid correlation: ρ = {correlation} (must lie in [{min}, 1])")]
    InvalidCorrelation {
        /// The invalid correlation
        correlation: f64,
        /// Smallest admissible value for this basket size
        min: f64,
    },

    /// Barrier levels are not `0 < lower < upper`.
    #[error("Invalid barriers: lower = {lower}, upper = {upper}")]
    InvalidBarrier {
        /// Lower (knock-in) barrier
        lower: f64,
        /// Upper (knock-out) barrier
        upper: f64,
    },

    /// Rebate is negative or non-finite.
    #[error("Invalid rebate: {rebate}")]
    InvalidRebate {
        /// The invalid rebate
        rebate: f64,
    },

    /// Option side other than `call` / `put`.
    #[error("Unknown option type '{0}' (expected 'call' or 'put')")]
    UnknownOptionType(String),

    /// Control variate other than `none` / `geometric`.
    #[error("Unknown control variate '{0}' (expected 'none' or 'geometric')")]
    UnknownControlVariate(String),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidParameter(err.to_string())
    }
}
