//! European options on a basket of correlated assets.
//!
//! The basket pays on the average of the asset prices at expiry. Assets
//! share a single pairwise correlation ρ, which must keep the correlation
//! matrix positive semidefinite: `ρ ∈ [−1/(n−1), 1]`.

use super::error::InstrumentError;
use super::params::{
    check_count, check_expiry, check_rate, check_spot, check_strike, check_volatility,
    ControlVariate,
};
use super::payoff::OptionType;

/// Market and contract terms of a basket.
///
/// # Examples
/// ```
/// use pricer_models::instruments::BasketParams;
///
/// let basket = BasketParams::new(
///     vec![100.0, 100.0], vec![0.3, 0.3], 0.5, 0.05, 3.0, 100.0,
/// ).unwrap();
/// assert_eq!(basket.dimension(), 2);
///
/// // Volatility vector too short
/// assert!(BasketParams::new(vec![100.0, 100.0], vec![0.3], 0.5, 0.05, 3.0, 100.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BasketParams {
    spots: Vec<f64>,
    volatilities: Vec<f64>,
    correlation: f64,
    rate: f64,
    expiry: f64,
    strike: f64,
}

impl BasketParams {
    /// Creates basket terms with validation.
    ///
    /// # Arguments
    /// * `spots` - Initial asset prices (each positive, at least 2)
    /// * `volatilities` - Asset volatilities (same length, each non-negative)
    /// * `correlation` - Constant pairwise correlation ρ
    /// * `rate` - Risk-free rate r
    /// * `expiry` - Time to expiry T (positive)
    /// * `strike` - Strike K (positive)
    pub fn new(
        spots: Vec<f64>,
        volatilities: Vec<f64>,
        correlation: f64,
        rate: f64,
        expiry: f64,
        strike: f64,
    ) -> Result<Self, InstrumentError> {
        if spots.len() != volatilities.len() {
            return Err(InstrumentError::DimensionMismatch {
                spots: spots.len(),
                volatilities: volatilities.len(),
            });
        }
        if spots.len() < 2 {
            return Err(InstrumentError::InsufficientAssets {
                assets: spots.len(),
            });
        }
        for &spot in &spots {
            check_spot(spot)?;
        }
        for &vol in &volatilities {
            check_volatility(vol)?;
        }

        let min = -1.0 / (spots.len() - 1) as f64;
        if !(min..=1.0).contains(&correlation) {
            return Err(InstrumentError::InvalidCorrelation { correlation, min });
        }
        check_rate("risk-free", rate)?;
        check_expiry(expiry)?;
        check_strike(strike)?;

        Ok(Self {
            spots,
            volatilities,
            correlation,
            rate,
            expiry,
            strike,
        })
    }

    /// Number of assets.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.spots.len()
    }

    /// Initial asset prices.
    #[inline]
    pub fn spots(&self) -> &[f64] {
        &self.spots
    }

    /// Asset volatilities.
    #[inline]
    pub fn volatilities(&self) -> &[f64] {
        &self.volatilities
    }

    /// Constant pairwise correlation.
    #[inline]
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to expiry.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// `e^(−rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }
}

/// Basket option on the geometric mean, priced in closed form.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricBasketOption {
    basket: BasketParams,
    option_type: OptionType,
}

impl GeometricBasketOption {
    /// Creates a geometric basket option.
    pub fn new(basket: BasketParams, option_type: OptionType) -> Self {
        Self {
            basket,
            option_type,
        }
    }

    /// Returns the basket terms.
    #[inline]
    pub fn basket(&self) -> &BasketParams {
        &self.basket
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

/// Basket option on the arithmetic mean, priced by Monte Carlo.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{
///     ArithmeticBasketOption, BasketParams, ControlVariate, OptionType,
/// };
///
/// let basket = BasketParams::new(
///     vec![100.0, 100.0], vec![0.3, 0.3], 0.5, 0.05, 3.0, 100.0,
/// ).unwrap();
/// let option = ArithmeticBasketOption::new(
///     basket, 10_000, ControlVariate::Geometric, OptionType::Call,
/// ).unwrap();
/// assert_eq!(option.paths(), 10_000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticBasketOption {
    basket: BasketParams,
    paths: usize,
    control_variate: ControlVariate,
    option_type: OptionType,
}

impl ArithmeticBasketOption {
    /// Creates an arithmetic basket option simulated on `paths` paths.
    pub fn new(
        basket: BasketParams,
        paths: usize,
        control_variate: ControlVariate,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        check_count("paths", paths)?;
        Ok(Self {
            basket,
            paths,
            control_variate,
            option_type,
        })
    }

    /// Returns the basket terms.
    #[inline]
    pub fn basket(&self) -> &BasketParams {
        &self.basket
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

    /// The geometric-mean counterpart used as control variate.
    pub fn geometric(&self) -> GeometricBasketOption {
        GeometricBasketOption::new(self.basket.clone(), self.option_type)
    }
}
