//! Common instrument parameters.
//!
//! This module provides the parameter block shared by every single-asset
//! option family, plus the control-variate switch used by the
//! simulation-priced families.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Common parameters shared across single-asset instrument types.
///
/// Holds spot, risk-free rate, time to expiry, strike and volatility.
/// Immutable after construction.
///
/// # Invariants
/// - `spot > 0`, `strike > 0`, `expiry > 0`
/// - `volatility >= 0`
/// - all values finite
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentParams;
///
/// let params = InstrumentParams::new(100.0, 0.05, 1.0, 95.0, 0.2).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert_eq!(params.strike(), 95.0);
/// assert!((params.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentParams {
    spot: f64,
    rate: f64,
    expiry: f64,
    strike: f64,
    volatility: f64,
}

impl InstrumentParams {
    /// Creates new instrument parameters with validation.
    ///
    /// # Arguments
    /// * `spot` - Spot price S0 (must be positive)
    /// * `rate` - Continuously compounded risk-free rate r
    /// * `expiry` - Time to expiry T in years (must be positive)
    /// * `strike` - Strike price K (must be positive)
    /// * `volatility` - Volatility σ (must be non-negative)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{InstrumentError, InstrumentParams};
    ///
    /// assert!(InstrumentParams::new(100.0, 0.05, 1.0, 100.0, 0.0).is_ok());
    ///
    /// let invalid = InstrumentParams::new(100.0, 0.05, 0.0, 100.0, 0.2);
    /// assert!(matches!(invalid, Err(InstrumentError::InvalidExpiry { .. })));
    /// ```
    pub fn new(
        spot: f64,
        rate: f64,
        expiry: f64,
        strike: f64,
        volatility: f64,
    ) -> Result<Self, InstrumentError> {
        check_spot(spot)?;
        check_rate("risk-free", rate)?;
        check_expiry(expiry)?;
        check_strike(strike)?;
        check_volatility(volatility)?;

        Ok(Self {
            spot,
            rate,
            expiry,
            strike,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the time to expiry.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// `e^(−rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Copy of these parameters with the spot replaced.
    ///
    /// Used by finite-difference sensitivities; the new spot is validated.
    pub fn with_spot(&self, spot: f64) -> Result<Self, InstrumentError> {
        check_spot(spot)?;
        Ok(Self { spot, ..*self })
    }
}

/// Control variate applied by the arithmetic Monte Carlo pricers.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ControlVariate;
///
/// assert_eq!("geometric".parse::<ControlVariate>().unwrap(), ControlVariate::Geometric);
/// assert_eq!(ControlVariate::default(), ControlVariate::Geometric);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ControlVariate {
    /// Plain Monte Carlo mean
    None,
    /// Regress on the geometric-average payoff with known closed form
    #[default]
    Geometric,
}

impl fmt::Display for ControlVariate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlVariate::None => write!(f, "none"),
            ControlVariate::Geometric => write!(f, "geometric"),
        }
    }
}

impl FromStr for ControlVariate {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ControlVariate::None),
            "geometric" => Ok(ControlVariate::Geometric),
            _ => Err(InstrumentError::UnknownControlVariate(s.to_string())),
        }
    }
}

pub(crate) fn check_spot(spot: f64) -> Result<(), InstrumentError> {
    if spot > 0.0 && spot.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidSpot { spot })
    }
}

pub(crate) fn check_strike(strike: f64) -> Result<(), InstrumentError> {
    if strike > 0.0 && strike.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidStrike { strike })
    }
}

pub(crate) fn check_expiry(expiry: f64) -> Result<(), InstrumentError> {
    if expiry > 0.0 && expiry.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidExpiry { expiry })
    }
}

pub(crate) fn check_volatility(volatility: f64) -> Result<(), InstrumentError> {
    if volatility >= 0.0 && volatility.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidVolatility { volatility })
    }
}

pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), InstrumentError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidRate { name, value })
    }
}

pub(crate) fn check_count(name: &'static str, value: usize) -> Result<(), InstrumentError> {
    if value > 0 {
        Ok(())
    } else {
        Err(InstrumentError::InvalidCount { name, value })
    }
}
