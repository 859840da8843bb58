//! Closed forms for geometric-average options.
//!
//! Both families reduce to a single lognormal "asset" whose forward and
//! total variance are known, then price through [`black_forward`]:
//!
//! - **Asian** (Kemna-Vorst, discrete monitoring at iT/n):
//!   σ̂ = σ·√[(n+1)(2n+1)/(6n²)], μ̂ = (r − ½σ²)(n+1)/(2n) + ½σ̂²
//! - **Basket** (constant pairwise correlation ρ):
//!   G₀ = (∏Sᵢ)^(1/n), σ_G² = [Σσᵢ² + ρ((Σσᵢ)² − Σσᵢ²)]/n², μ_G = r − ½·mean(σᵢ²) + ½σ_G²
//!
//! In both cases the forward is `X₀·e^(μT)` and the discount is `e^(−rT)`.

use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;

use super::black_scholes::black_forward;
use crate::instruments::{GeometricAsianOption, GeometricBasketOption};

/// Effective volatility and drift of the discrete geometric average.
///
/// Returns `(σ̂, μ̂)`.
pub fn geometric_asian_moments(volatility: f64, rate: f64, observations: usize) -> (f64, f64) {
    let n = observations as f64;
    let sigma_hat = volatility * ((n + 1.0) * (2.0 * n + 1.0) / (6.0 * n * n)).sqrt();
    let mu_hat = (rate - 0.5 * volatility * volatility) * (n + 1.0) / (2.0 * n)
        + 0.5 * sigma_hat * sigma_hat;
    (sigma_hat, mu_hat)
}

/// Prices a discretely monitored geometric-average Asian option.
///
/// # Errors
/// `PricingError::DegenerateInput` when σ = 0 (σ̂√T vanishes).
///
/// # Examples
/// ```
/// use pricer_models::analytical::geometric_asian_price;
/// use pricer_models::instruments::{GeometricAsianOption, InstrumentParams, OptionType};
///
/// let params = InstrumentParams::new(100.0, 0.05, 3.0, 100.0, 0.3).unwrap();
/// let option = GeometricAsianOption::new(params, 50, OptionType::Call).unwrap();
/// let price = geometric_asian_price(&option).unwrap();
/// assert!((price - 13.2591).abs() < 1e-3);
/// ```
pub fn geometric_asian_price(option: &GeometricAsianOption) -> Result<f64, PricingError> {
    let params = option.params();
    let expiry = params.expiry();
    let (sigma_hat, mu_hat) =
        geometric_asian_moments(params.volatility(), params.rate(), option.observations());

    let forward = params.spot() * (mu_hat * expiry).exp();
    let price = black_forward(
        forward,
        params.strike(),
        sigma_hat * expiry.sqrt(),
        params.discount_factor(),
        option.option_type(),
    )?;
    Ok(price)
}

/// Prices a geometric-mean basket option.
///
/// # Errors
/// `PricingError::DegenerateInput` when the basket variance σ_G² is zero,
/// for example with every volatility at zero or a fully hedged
/// `ρ = −1` pair of equal volatilities.
///
/// # Examples
/// ```
/// use pricer_models::analytical::geometric_basket_price;
/// use pricer_models::instruments::{BasketParams, GeometricBasketOption, OptionType};
///
/// let basket = BasketParams::new(vec![100.0, 100.0], vec![0.3, 0.3], 0.5, 0.05, 3.0, 100.0).unwrap();
/// let option = GeometricBasketOption::new(basket, OptionType::Call);
/// let price = geometric_basket_price(&option).unwrap();
/// assert!((price - 22.1021).abs() < 1e-3);
/// ```
pub fn geometric_basket_price(option: &GeometricBasketOption) -> Result<f64, PricingError> {
    let basket = option.basket();
    let expiry = basket.expiry();
    let (g0, sigma_g, mu_g) = geometric_basket_moments(
        basket.spots(),
        basket.volatilities(),
        basket.correlation(),
        basket.rate(),
    );

    let forward = g0 * (mu_g * expiry).exp();
    let price = black_forward(
        forward,
        basket.strike(),
        sigma_g * expiry.sqrt(),
        basket.discount_factor(),
        option.option_type(),
    )?;
    Ok(price)
}

/// `(G₀, σ_G, μ_G)` of the geometric basket mean.
///
/// `spots` and `volatilities` have equal, non-zero length.
pub fn geometric_basket_moments(
    spots: &[f64],
    volatilities: &[f64],
    correlation: f64,
    rate: f64,
) -> (f64, f64, f64) {
    let n = spots.len() as f64;
    // Average of logs avoids overflow of the raw product for wide baskets
    let g0 = (spots.iter().map(|s| s.ln()).sum::<f64>() / n).exp();

    let sum_sq: f64 = volatilities.iter().map(|v| v * v).sum();
    let sum: f64 = volatilities.iter().sum();
    let variance = ((sum_sq + correlation * (sum * sum - sum_sq)) / (n * n)).max(0.0);
    let mu_g = rate - 0.5 * sum_sq / n + 0.5 * variance;

    (g0, variance.sqrt(), mu_g)
}

impl Priceable for GeometricAsianOption {
    fn price(&self) -> Result<f64, PricingError> {
        geometric_asian_price(self)
    }
}

impl Priceable for GeometricBasketOption {
    fn price(&self) -> Result<f64, PricingError> {
        geometric_basket_price(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use crate::instruments::{BasketParams, InstrumentParams, OptionType};
    use approx::assert_relative_eq;

    fn asian(option_type: OptionType, volatility: f64, n: usize) -> GeometricAsianOption {
        let params = InstrumentParams::new(100.0, 0.05, 3.0, 100.0, volatility).unwrap();
        GeometricAsianOption::new(params, n, option_type).unwrap()
    }

    #[test]
    fn test_asian_reference_values() {
        let call = geometric_asian_price(&asian(OptionType::Call, 0.3, 50)).unwrap();
        let put = geometric_asian_price(&asian(OptionType::Put, 0.3, 50)).unwrap();
        assert_relative_eq!(call, 13.259126, epsilon = 1e-4);
        assert_relative_eq!(put, 8.482705, epsilon = 1e-4);
    }

    #[test]
    fn test_asian_is_deterministic() {
        let option = asian(OptionType::Call, 0.3, 50);
        let first = geometric_asian_price(&option).unwrap();
        for _ in 0..5 {
            assert_eq!(geometric_asian_price(&option).unwrap().to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_asian_single_observation_is_european() {
        // n = 1 samples only S_T: σ̂ = σ, μ̂ = r
        let option = asian(OptionType::Call, 0.3, 1);
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.3).unwrap();
        assert_relative_eq!(
            geometric_asian_price(&option).unwrap(),
            bs.price(100.0, 3.0, OptionType::Call).unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_asian_cheaper_than_european() {
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.3).unwrap();
        let european = bs.price(100.0, 3.0, OptionType::Call).unwrap();
        let asian_call = geometric_asian_price(&asian(OptionType::Call, 0.3, 50)).unwrap();
        assert!(asian_call < european);
    }

    #[test]
    fn test_asian_moments_large_n_limit() {
        // n → ∞: σ̂ → σ/√3
        let (sigma_hat, _) = geometric_asian_moments(0.3, 0.05, 1_000_000);
        assert_relative_eq!(sigma_hat, 0.3 / 3.0_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_asian_zero_volatility_is_degenerate() {
        let result = geometric_asian_price(&asian(OptionType::Call, 0.0, 50));
        assert!(matches!(result, Err(PricingError::DegenerateInput(_))));
    }

    #[test]
    fn test_basket_reference_values() {
        let basket =
            BasketParams::new(vec![100.0, 100.0], vec![0.3, 0.3], 0.5, 0.05, 3.0, 100.0).unwrap();
        let call = geometric_basket_price(&GeometricBasketOption::new(
            basket.clone(),
            OptionType::Call,
        ))
        .unwrap();
        let put =
            geometric_basket_price(&GeometricBasketOption::new(basket, OptionType::Put)).unwrap();
        assert_relative_eq!(call, 22.102093, epsilon = 1e-4);
        assert_relative_eq!(put, 11.491573, epsilon = 1e-4);
    }

    #[test]
    fn test_basket_perfect_correlation_is_single_asset() {
        let basket =
            BasketParams::new(vec![100.0, 100.0], vec![0.3, 0.3], 1.0, 0.05, 3.0, 100.0).unwrap();
        let option = GeometricBasketOption::new(basket, OptionType::Call);
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.3).unwrap();
        assert_relative_eq!(
            Priceable::price(&option).unwrap(),
            bs.price(100.0, 3.0, OptionType::Call).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_basket_moments_three_assets() {
        let (g0, sigma_g, mu_g) =
            geometric_basket_moments(&[50.0, 100.0, 200.0], &[0.1, 0.2, 0.3], 0.25, 0.04);
        assert_relative_eq!(g0, 100.0, epsilon = 1e-10);
        // Σσ² = 0.14, (Σσ)² = 0.36 → σ_G² = (0.14 + 0.25·0.22)/9
        let variance: f64 = (0.14 + 0.25 * 0.22) / 9.0;
        assert_relative_eq!(sigma_g, variance.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(mu_g, 0.04 - 0.07 / 3.0 + 0.5 * variance, epsilon = 1e-12);
    }

    #[test]
    fn test_basket_offsetting_pair_is_degenerate() {
        let basket =
            BasketParams::new(vec![100.0, 100.0], vec![0.3, 0.3], -1.0, 0.05, 1.0, 100.0).unwrap();
        let result = geometric_basket_price(&GeometricBasketOption::new(basket, OptionType::Call));
        assert!(matches!(result, Err(PricingError::DegenerateInput(_))));
    }
}
