//! Black-Scholes pricing model for European options with a repo yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The same kernel prices any lognormal forward through [`black_forward`],
//! which the geometric Asian and basket closed forms reuse.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::{EuropeanOption, OptionType};

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionType;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price(100.0, 1.0, OptionType::Call).unwrap();
/// let put = bs.price(100.0, 1.0, OptionType::Put).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Repo / dividend yield (q)
    dividend: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// Zero volatility is accepted here; pricing then fails with
    /// [`AnalyticalError::DegenerateVariance`].
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0 or non-finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0, -0.2).is_err());
    /// ```
    pub fn new(
        spot: f64,
        rate: f64,
        dividend: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility >= 0.0 && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Model matching a validated European option.
    pub fn for_option(option: &EuropeanOption) -> Self {
        let params = option.params();
        Self {
            spot: params.spot(),
            rate: params.rate(),
            dividend: option.repo_rate(),
            volatility: params.volatility(),
        }
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

    /// Returns the repo / dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Same market with a different volatility, for use inside solvers.
    #[inline]
    pub(crate) fn with_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }

    /// Total standard deviation σ√T, rejected when zero.
    fn std_dev(&self, expiry: f64) -> Result<f64, AnalyticalError> {
        let std_dev = self.volatility * expiry.max(0.0).sqrt();
        if std_dev > 0.0 && std_dev.is_finite() {
            Ok(std_dev)
        } else {
            Err(AnalyticalError::DegenerateVariance { std_dev })
        }
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    pub fn d1(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let std_dev = self.std_dev(expiry)?;
        Ok(self.d1_unchecked(strike, expiry, std_dev))
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    pub fn d2(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let std_dev = self.std_dev(expiry)?;
        Ok(self.d1_unchecked(strike, expiry, std_dev) - std_dev)
    }

    #[inline]
    fn d1_unchecked(&self, strike: f64, expiry: f64, std_dev: f64) -> f64 {
        let drift = (self.rate - self.dividend + 0.5 * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / std_dev
    }

    /// Computes the European option price.
    ///
    /// # Errors
    /// `AnalyticalError::DegenerateVariance` if σ√T is zero.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(2.0, 0.03, 0.0, 0.3).unwrap();
    /// let call = bs.price(2.0, 3.0, OptionType::Call).unwrap();
    /// assert!((call - 0.48414).abs() < 1e-4);
    ///
    /// let flat = BlackScholes::new(2.0, 0.03, 0.0, 0.0).unwrap();
    /// assert!(flat.price(2.0, 3.0, OptionType::Call).is_err());
    /// ```
    pub fn price(
        &self,
        strike: f64,
        expiry: f64,
        option_type: OptionType,
    ) -> Result<f64, AnalyticalError> {
        let std_dev = self.std_dev(expiry)?;
        Ok(self.price_unchecked(strike, expiry, std_dev, option_type))
    }

    #[inline]
    fn price_unchecked(
        &self,
        strike: f64,
        expiry: f64,
        std_dev: f64,
        option_type: OptionType,
    ) -> f64 {
        let forward = self.spot * ((self.rate - self.dividend) * expiry).exp();
        let discount = (-self.rate * expiry).exp();
        black_kernel(forward, strike, std_dev, discount, option_type)
    }

    /// Computes Vega (∂V/∂σ).
    ///
    /// Vega = S·e^(-qT)·√T·φ(d₁), identical for calls and puts.
    pub fn vega(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let std_dev = self.std_dev(expiry)?;
        Ok(self.vega_unchecked(strike, expiry, std_dev))
    }

    #[inline]
    fn vega_unchecked(&self, strike: f64, expiry: f64, std_dev: f64) -> f64 {
        let d1 = self.d1_unchecked(strike, expiry, std_dev);
        self.spot * (-self.dividend * expiry).exp() * expiry.sqrt() * norm_pdf(d1)
    }

    /// Price and vega for a strictly positive σ√T.
    ///
    /// Callers guarantee `volatility > 0` and `expiry > 0`; used by the
    /// implied volatility iteration, which enforces that domain itself.
    #[inline]
    pub(crate) fn price_and_vega_positive(
        &self,
        strike: f64,
        expiry: f64,
        option_type: OptionType,
    ) -> (f64, f64) {
        let std_dev = self.volatility * expiry.sqrt();
        (
            self.price_unchecked(strike, expiry, std_dev, option_type),
            self.vega_unchecked(strike, expiry, std_dev),
        )
    }
}

/// Black formula on a lognormal forward.
///
/// `discount · ω · (F·Φ(ω·d₁) − K·Φ(ω·d₂))` with
/// `d₁ = (ln(F/K) + s²/2) / s`, `d₂ = d₁ − s`, `s` the total standard
/// deviation of `ln F_T`, `ω = +1` for calls and `−1` for puts.
///
/// # Errors
/// `AnalyticalError::DegenerateVariance` if `std_dev` is not positive.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_forward;
/// use pricer_models::instruments::OptionType;
///
/// // At-the-money forward: call and put coincide
/// let call = black_forward(100.0, 100.0, 0.2, 0.95, OptionType::Call).unwrap();
/// let put = black_forward(100.0, 100.0, 0.2, 0.95, OptionType::Put).unwrap();
/// assert!((call - put).abs() < 1e-12);
/// ```
pub fn black_forward(
    forward: f64,
    strike: f64,
    std_dev: f64,
    discount: f64,
    option_type: OptionType,
) -> Result<f64, AnalyticalError> {
    if !(std_dev > 0.0 && std_dev.is_finite()) {
        return Err(AnalyticalError::DegenerateVariance { std_dev });
    }
    Ok(black_kernel(forward, strike, std_dev, discount, option_type))
}

#[inline]
fn black_kernel(
    forward: f64,
    strike: f64,
    std_dev: f64,
    discount: f64,
    option_type: OptionType,
) -> f64 {
    let d1 = ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev;
    let d2 = d1 - std_dev;
    let w = option_type.sign();
    discount * w * (forward * norm_cdf(w * d1) - strike * norm_cdf(w * d2))
}

impl Priceable for EuropeanOption {
    fn price(&self) -> Result<f64, PricingError> {
        let params = self.params();
        BlackScholes::for_option(self)
            .price(params.strike(), params.expiry(), self.option_type())
            .map_err(PricingError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::InstrumentParams;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0, 0.05, 0.01, 0.2).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.dividend(), 0.01);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot_zero() {
        assert!(matches!(
            BlackScholes::new(0.0, 0.05, 0.0, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
    }

    #[test]
    fn test_zero_volatility_is_degenerate_not_nan() {
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.0).unwrap();
        assert!(matches!(
            bs.d1(100.0, 1.0),
            Err(AnalyticalError::DegenerateVariance { .. })
        ));
        assert!(matches!(
            bs.price(100.0, 1.0, OptionType::Put),
            Err(AnalyticalError::DegenerateVariance { .. })
        ));
        assert!(bs.vega(100.0, 1.0).is_err());
    }

    #[test]
    fn test_zero_expiry_is_degenerate() {
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
        assert!(bs.price(100.0, 0.0, OptionType::Call).is_err());
    }

    // ==========================================================
    // d1 / d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.25).unwrap();
        let d1 = bs.d1(95.0, 2.0).unwrap();
        let d2 = bs.d2(95.0, 2.0).unwrap();
        assert_relative_eq!(d1 - d2, 0.25 * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_d1_atm() {
        // d1 = (r + σ²/2)T / (σ√T) = (0.05 + 0.02) / 0.2 = 0.35
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.d1(100.0, 1.0).unwrap(), 0.35, epsilon = 1e-12);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        // S=100, K=100, T=1, r=5%, σ=20%: C ≈ 10.4506
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
        let call = bs.price(100.0, 1.0, OptionType::Call).unwrap();
        assert_relative_eq!(call, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_put_price_reference_value() {
        // S=100, K=100, T=1, r=5%, σ=20%: P ≈ 5.5735
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
        let put = bs.price(100.0, 1.0, OptionType::Put).unwrap();
        assert_relative_eq!(put, 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_two_dollar_call_scenario() {
        // S0=2, K=2, T=3, r=3%, q=0, σ=30%
        let params = InstrumentParams::new(2.0, 0.03, 3.0, 2.0, 0.3).unwrap();
        let option = EuropeanOption::new(params, 0.0, OptionType::Call).unwrap();
        let price = Priceable::price(&option).unwrap();
        assert!((price - 0.484136).abs() < 1e-3, "price = {}", price);
    }

    #[test]
    fn test_repo_rate_lowers_call() {
        let no_div = BlackScholes::new(2.0, 0.03, 0.0, 0.3).unwrap();
        let div = BlackScholes::new(2.0, 0.03, 0.01, 0.3).unwrap();
        let c0 = no_div.price(2.0, 3.0, OptionType::Call).unwrap();
        let c1 = div.price(2.0, 3.0, OptionType::Call).unwrap();
        assert!(c1 < c0);
        // Reference: 0.4453
        assert_relative_eq!(c1, 0.4453, epsilon = 1e-3);
    }

    #[test]
    fn test_deep_itm_call_near_forward_intrinsic() {
        let bs = BlackScholes::new(200.0, 0.05, 0.0, 0.2).unwrap();
        let call = bs.price(50.0, 1.0, OptionType::Call).unwrap();
        let intrinsic = 200.0 - 50.0 * (-0.05_f64).exp();
        assert_relative_eq!(call, intrinsic, epsilon = 1e-6);
    }

    // ==========================================================
    // Put-Call Parity Tests
    // ==========================================================

    #[test]
    fn test_put_call_parity_negative_rate() {
        let bs = BlackScholes::new(100.0, -0.02, 0.0, 0.2).unwrap();
        let call = bs.price(100.0, 1.0, OptionType::Call).unwrap();
        let put = bs.price(100.0, 1.0, OptionType::Put).unwrap();
        let forward = 100.0 - 100.0 * (0.02_f64).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-10);
    }

    proptest! {
        #[test]
        fn prop_put_call_parity(
            spot in 1.0_f64..500.0,
            strike in 1.0_f64..500.0,
            expiry in 0.01_f64..10.0,
            rate in -0.05_f64..0.15,
            dividend in 0.0_f64..0.1,
            vol in 0.01_f64..1.5,
        ) {
            let bs = BlackScholes::new(spot, rate, dividend, vol).unwrap();
            let call = bs.price(strike, expiry, OptionType::Call).unwrap();
            let put = bs.price(strike, expiry, OptionType::Put).unwrap();
            let parity = spot * (-dividend * expiry).exp() - strike * (-rate * expiry).exp();
            // Φ is approximated to ~1e-7, scaled by the larger notional leg
            let tol = 1e-6 * spot.max(strike);
            prop_assert!((call - put - parity).abs() < tol,
                "C - P = {}, parity = {}", call - put, parity);
        }
    }

    // ==========================================================
    // Vega Tests
    // ==========================================================

    #[test]
    fn test_vega_vs_finite_diff() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        let h = 1e-3;
        let up = bs.with_volatility(0.2 + h).price(100.0, 1.0, OptionType::Call).unwrap();
        let dn = bs.with_volatility(0.2 - h).price(100.0, 1.0, OptionType::Call).unwrap();
        let fd_vega = (up - dn) / (2.0 * h);
        assert_relative_eq!(bs.vega(100.0, 1.0).unwrap(), fd_vega, epsilon = 1e-3);
    }

    #[test]
    fn test_price_and_vega_positive_matches_checked() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.3).unwrap();
        let (price, vega) = bs.price_and_vega_positive(110.0, 0.5, OptionType::Put);
        assert_eq!(price, bs.price(110.0, 0.5, OptionType::Put).unwrap());
        assert_eq!(vega, bs.vega(110.0, 0.5).unwrap());
    }

    // ==========================================================
    // Black forward kernel
    // ==========================================================

    #[test]
    fn test_black_forward_rejects_zero_std() {
        assert!(matches!(
            black_forward(100.0, 100.0, 0.0, 1.0, OptionType::Call),
            Err(AnalyticalError::DegenerateVariance { .. })
        ));
    }

    #[test]
    fn test_black_forward_matches_black_scholes() {
        let bs = BlackScholes::new(100.0, 0.05, 0.01, 0.25).unwrap();
        let expiry: f64 = 2.0;
        let forward = 100.0 * ((0.05 - 0.01) * expiry).exp();
        let expected = bs.price(105.0, expiry, OptionType::Call).unwrap();
        let black = black_forward(
            forward,
            105.0,
            0.25 * expiry.sqrt(),
            (-0.05 * expiry).exp(),
            OptionType::Call,
        )
        .unwrap();
        assert_relative_eq!(black, expected, epsilon = 1e-12);
    }
}
