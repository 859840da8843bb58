//! Knock-in/knock-out (KIKO) barrier option.
//!
//! Monitored discretely on `n` equally spaced dates. Reaching the upper
//! barrier knocks the option out against a flat rebate paid at the breach
//! date. Otherwise, touching the lower barrier knocks in a vanilla put
//! paid at expiry.

use super::error::InstrumentError;
use super::params::{check_count, InstrumentParams};

/// KIKO barrier option priced by quasi-Monte Carlo.
///
/// # Invariants
/// - `0 < lower_barrier < upper_barrier`
/// - `rebate >= 0`
/// - `observations > 0`, `paths > 0`
///
/// # Examples
/// ```
/// use pricer_models::instruments::{InstrumentParams, KikoOption};
///
/// let params = InstrumentParams::new(100.0, 0.05, 2.0, 100.0, 0.2).unwrap();
/// let kiko = KikoOption::new(params, 80.0, 125.0, 24, 1.5, 100_000).unwrap();
/// assert_eq!(kiko.upper_barrier(), 125.0);
///
/// assert!(KikoOption::new(params, 125.0, 80.0, 24, 1.5, 100_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KikoOption {
    params: InstrumentParams,
    lower_barrier: f64,
    upper_barrier: f64,
    observations: usize,
    rebate: f64,
    paths: usize,
}

impl KikoOption {
    /// Creates a KIKO option.
    ///
    /// # Arguments
    /// * `params` - Common parameters (the strike applies to the knocked-in put)
    /// * `lower_barrier` - Knock-in level
    /// * `upper_barrier` - Knock-out level
    /// * `observations` - Number of monitoring dates
    /// * `rebate` - Amount paid on knock-out
    /// * `paths` - Number of quasi-random paths
    pub fn new(
        params: InstrumentParams,
        lower_barrier: f64,
        upper_barrier: f64,
        observations: usize,
        rebate: f64,
        paths: usize,
    ) -> Result<Self, InstrumentError> {
        let barriers_ok = lower_barrier > 0.0
            && upper_barrier.is_finite()
            && lower_barrier < upper_barrier;
        if !barriers_ok {
            return Err(InstrumentError::InvalidBarrier {
                lower: lower_barrier,
                upper: upper_barrier,
            });
        }
        if !(rebate >= 0.0 && rebate.is_finite()) {
            return Err(InstrumentError::InvalidRebate { rebate });
        }
        check_count("observations", observations)?;
        check_count("paths", paths)?;

        Ok(Self {
            params,
            lower_barrier,
            upper_barrier,
            observations,
            rebate,
            paths,
        })
    }

    /// Returns the common parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams {
        &self.params
    }

    /// Knock-in level.
    #[inline]
    pub fn lower_barrier(&self) -> f64 {
        self.lower_barrier
    }

    /// Knock-out level.
    #[inline]
    pub fn upper_barrier(&self) -> f64 {
        self.upper_barrier
    }

    /// Number of monitoring dates.
    #[inline]
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Knock-out rebate.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    /// Number of simulated paths.
    #[inline]
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Same contract on a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, InstrumentError> {
        Ok(Self {
            params: self.params.with_spot(spot)?,
            ..*self
        })
    }
}
