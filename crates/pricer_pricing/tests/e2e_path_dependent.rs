//! End-to-end tests for the simulated instrument families.
//!
//! These tests drive complete pricing requests through
//! [`price_instrument`] and check the reproducibility guarantees.
//!
//! # Test Coverage
//!
//! - Bit-identical repeat runs for a fixed seed
//! - Parallel versus sequential batch execution
//! - Seed sensitivity
//! - KIKO delta on a shared point set

use pricer_models::instruments::{
    ArithmeticAsianOption, ArithmeticBasketOption, BasketParams, ControlVariate, Instrument,
    InstrumentParams, KikoOption, OptionType,
};
use pricer_pricing::engine::{price_instrument, PriceOutcome};
use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::path_dependent::KikoPricer;

fn standard_params() -> InstrumentParams {
    InstrumentParams::new(100.0, 0.05, 3.0, 100.0, 0.3).unwrap()
}

/// One instrument of each simulated family.
fn simulated_instruments() -> Vec<Instrument> {
    let asian = ArithmeticAsianOption::new(
        standard_params(),
        50,
        20_000,
        ControlVariate::Geometric,
        OptionType::Call,
    )
    .unwrap();
    let basket = BasketParams::new(
        vec![100.0, 90.0, 110.0],
        vec![0.3, 0.2, 0.25],
        0.4,
        0.05,
        3.0,
        100.0,
    )
    .unwrap();
    let basket =
        ArithmeticBasketOption::new(basket, 20_000, ControlVariate::Geometric, OptionType::Put)
            .unwrap();
    let kiko = KikoOption::new(standard_params(), 80.0, 125.0, 24, 1.5, 20_000).unwrap();

    vec![
        Instrument::ArithmeticAsian(asian),
        Instrument::ArithmeticBasket(basket),
        Instrument::Kiko(kiko),
    ]
}

fn config(seed: u64, parallel: bool) -> MonteCarloConfig {
    MonteCarloConfig::builder()
        .seed(seed)
        .batch_size(1_024)
        .parallel(parallel)
        .build()
        .unwrap()
}

fn bits(outcome: &PriceOutcome) -> (u64, u64, u64) {
    let (low, high) = outcome.confidence_interval().unwrap_or((0.0, 0.0));
    (outcome.value().to_bits(), low.to_bits(), high.to_bits())
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn e2e_repeat_runs_are_bit_identical() {
    for instrument in simulated_instruments() {
        let first = price_instrument(&instrument, &config(42, true)).unwrap();
        let second = price_instrument(&instrument, &config(42, true)).unwrap();
        assert_eq!(bits(&first), bits(&second), "{}", instrument.kind());
    }
}

#[test]
fn e2e_parallel_matches_sequential() {
    for instrument in simulated_instruments() {
        let parallel = price_instrument(&instrument, &config(7, true)).unwrap();
        let sequential = price_instrument(&instrument, &config(7, false)).unwrap();
        assert_eq!(bits(&parallel), bits(&sequential), "{}", instrument.kind());
    }
}

#[test]
fn e2e_seed_changes_the_estimate() {
    for instrument in simulated_instruments() {
        let a = price_instrument(&instrument, &config(1, true)).unwrap();
        let b = price_instrument(&instrument, &config(2, true)).unwrap();
        assert_ne!(a.value(), b.value(), "{}", instrument.kind());

        // Different draws, same quantity
        let (low_a, high_a) = a.confidence_interval().unwrap();
        let (low_b, high_b) = b.confidence_interval().unwrap();
        let widths = (high_a - low_a) + (high_b - low_b);
        assert!((a.value() - b.value()).abs() < widths, "{}", instrument.kind());
    }
}

#[test]
fn e2e_outcome_shapes() {
    let outcomes: Vec<PriceOutcome> = simulated_instruments()
        .iter()
        .map(|instrument| price_instrument(instrument, &config(0, true)).unwrap())
        .collect();

    assert!(matches!(outcomes[0], PriceOutcome::Estimate(e) if e.n_paths == 20_000));
    assert!(matches!(outcomes[1], PriceOutcome::Estimate(_)));
    assert!(matches!(outcomes[2], PriceOutcome::Kiko(_)));
}

// ============================================================================
// KIKO Greeks
// ============================================================================

#[test]
fn e2e_kiko_delta_is_reproducible_and_bounded() {
    let option = KikoOption::new(standard_params(), 80.0, 125.0, 24, 1.5, 20_000).unwrap();
    let pricer = KikoPricer::new(option);

    let delta = pricer.delta(11).unwrap();
    assert_eq!(delta.to_bits(), pricer.delta(11).unwrap().to_bits());
    // Knock-in put below, capped rebate above: a short-spot profile
    assert!(delta < 0.0 && delta > -1.0, "delta = {}", delta);
}

#[test]
fn e2e_kiko_custom_bump() {
    let option = KikoOption::new(standard_params(), 80.0, 125.0, 24, 1.5, 20_000).unwrap();
    let default = KikoPricer::new(option).delta(3).unwrap();
    let custom = KikoPricer::new(option).with_bump(2.0).unwrap().delta(3).unwrap();
    assert!((default - custom).abs() < 0.1);
}
