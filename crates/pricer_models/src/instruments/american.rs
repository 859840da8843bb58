//! American option priced on a binomial lattice.

use super::error::InstrumentError;
use super::params::{check_count, InstrumentParams};
use super::payoff::OptionType;

/// American option with early exercise at every lattice node.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{AmericanOption, InstrumentParams, OptionType};
///
/// let params = InstrumentParams::new(50.0, 0.1, 0.4167, 50.0, 0.4).unwrap();
/// let option = AmericanOption::new(params, 500, OptionType::Put).unwrap();
/// assert_eq!(option.steps(), 500);
///
/// assert!(AmericanOption::new(params, 0, OptionType::Put).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmericanOption {
    params: InstrumentParams,
    steps: usize,
    option_type: OptionType,
}

impl AmericanOption {
    /// Creates an American option.
    ///
    /// # Arguments
    /// * `params` - Common parameters
    /// * `steps` - Number of lattice time steps N (must be positive)
    /// * `option_type` - Call or put
    pub fn new(
        params: InstrumentParams,
        steps: usize,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        check_count("steps", steps)?;
        Ok(Self {
            params,
            steps,
            option_type,
        })
    }

    /// Returns the common parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams {
        &self.params
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}
