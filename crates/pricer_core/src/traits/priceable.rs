//! Trait for instruments with a deterministic price.

use crate::types::PricingError;

/// Trait for instruments that price to a single deterministic value.
///
/// Implemented by the closed-form families (European, geometric Asian,
/// geometric basket). Simulation-based families return an estimate with a
/// confidence interval instead and do not implement this trait.
///
/// # Example
///
/// ```
/// use pricer_core::traits::Priceable;
/// use pricer_core::types::PricingError;
///
/// struct Forward {
///     spot: f64,
///     strike: f64,
///     discount: f64,
/// }
///
/// impl Priceable for Forward {
///     fn price(&self) -> Result<f64, PricingError> {
///         Ok(self.spot - self.strike * self.discount)
///     }
/// }
///
/// let fwd = Forward { spot: 100.0, strike: 100.0, discount: 0.95 };
/// assert!((fwd.price().unwrap() - 5.0).abs() < 1e-12);
/// ```
pub trait Priceable {
    /// Calculate the present value of the instrument.
    ///
    /// # Errors
    /// Returns a [`PricingError`] when the inputs make the pricing formula
    /// undefined. The method never returns NaN in place of an error.
    fn price(&self) -> Result<f64, PricingError>;
}
