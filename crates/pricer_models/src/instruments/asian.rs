//! Discretely monitored Asian options.
//!
//! Both families average the spot over `n` equally spaced observation
//! dates `t_i = i·T/n`, `i = 1..=n`. The initial spot is not part of the
//! average.

use super::error::InstrumentError;
use super::params::{check_count, ControlVariate, InstrumentParams};
use super::payoff::OptionType;

/// Asian option on the geometric average, priced in closed form.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{GeometricAsianOption, InstrumentParams, OptionType};
///
/// let params = InstrumentParams::new(100.0, 0.05, 3.0, 100.0, 0.3).unwrap();
/// let option = GeometricAsianOption::new(params, 50, OptionType::Call).unwrap();
/// assert_eq!(option.observations(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricAsianOption {
    params: InstrumentParams,
    observations: usize,
    option_type: OptionType,
}

impl GeometricAsianOption {
    /// Creates a geometric Asian option with `observations` averaging dates.
    pub fn new(
        params: InstrumentParams,
        observations: usize,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        check_count("observations", observations)?;
        Ok(Self {
            params,
            observations,
            option_type,
        })
    }

    /// Returns the common parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams {
        &self.params
    }

    /// Returns the number of observation dates.
    #[inline]
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

/// Asian option on the arithmetic average, priced by Monte Carlo.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{
///     ArithmeticAsianOption, ControlVariate, InstrumentParams, OptionType,
/// };
///
/// let params = InstrumentParams::new(100.0, 0.05, 3.0, 100.0, 0.3).unwrap();
/// let option = ArithmeticAsianOption::new(
///     params, 50, 100_000, ControlVariate::Geometric, OptionType::Call,
/// ).unwrap();
/// assert_eq!(option.geometric().observations(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArithmeticAsianOption {
    params: InstrumentParams,
    observations: usize,
    paths: usize,
    control_variate: ControlVariate,
    option_type: OptionType,
}

impl ArithmeticAsianOption {
    /// Creates an arithmetic Asian option.
    ///
    /// # Arguments
    /// * `params` - Common parameters
    /// * `observations` - Number of averaging dates n (positive)
    /// * `paths` - Number of Monte Carlo paths (positive)
    /// * `control_variate` - Variance reduction scheme
    /// * `option_type` - Call or put
    pub fn new(
        params: InstrumentParams,
        observations: usize,
        paths: usize,
        control_variate: ControlVariate,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        check_count("observations", observations)?;
        check_count("paths", paths)?;
        Ok(Self {
            params,
            observations,
            paths,
            control_variate,
            option_type,
        })
    }

    /// Returns the common parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams {
        &self.params
    }

    /// Returns the number of observation dates.
    #[inline]
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Returns the number of Monte Carlo paths.
    #[inline]
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Returns the control variate scheme.
    #[inline]
    pub fn control_variate(&self) -> ControlVariate {
        self.control_variate
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// The geometric-average counterpart used as control variate.
    pub fn geometric(&self) -> GeometricAsianOption {
        GeometricAsianOption {
            params: self.params,
            observations: self.observations,
            option_type: self.option_type,
        }
    }
}
