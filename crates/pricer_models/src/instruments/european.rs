//! European option on a single asset with a continuous repo (dividend) yield.

use super::error::InstrumentError;
use super::params::{check_rate, InstrumentParams};
use super::payoff::OptionType;

/// European option priced in closed form.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{EuropeanOption, InstrumentParams, OptionType};
///
/// let params = InstrumentParams::new(2.0, 0.03, 3.0, 2.0, 0.3).unwrap();
/// let option = EuropeanOption::new(params, 0.0, OptionType::Call).unwrap();
/// assert_eq!(option.repo_rate(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanOption {
    params: InstrumentParams,
    repo_rate: f64,
    option_type: OptionType,
}

impl EuropeanOption {
    /// Creates a European option.
    ///
    /// # Arguments
    /// * `params` - Common parameters
    /// * `repo_rate` - Continuous repo / dividend yield q (finite)
    /// * `option_type` - Call or put
    pub fn new(
        params: InstrumentParams,
        repo_rate: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        check_rate("repo", repo_rate)?;
        Ok(Self {
            params,
            repo_rate,
            option_type,
        })
    }

    /// Returns the common parameters.
    #[inline]
    pub fn params(&self) -> &InstrumentParams {
        &self.params
    }

    /// Returns the repo rate q.
    #[inline]
    pub fn repo_rate(&self) -> f64 {
        self.repo_rate
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_repo_rejected() {
        let params = InstrumentParams::new(100.0, 0.05, 1.0, 100.0, 0.2).unwrap();
        assert!(matches!(
            EuropeanOption::new(params, f64::INFINITY, OptionType::Put),
            Err(InstrumentError::InvalidRate { name: "repo", .. })
        ));
    }
}
