//! Property tests for the closed-form Black-Scholes analytics.

use approx::assert_relative_eq;
use pricer_models::analytical::{
    black, implied_vol, implied_vol_from_premium, price, BlackScholes, ImpliedVolQuote,
};
use pricer_models::instruments::{MarketParameters, OptionSide, OptionSpec};
use proptest::prelude::*;

fn side_strategy() -> impl Strategy<Value = OptionSide> {
    prop_oneof![Just(OptionSide::Call), Just(OptionSide::Put)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_put_call_parity(
        spot in 0.5_f64..2.0,
        strike in 0.5_f64..2.0,
        rate in -0.02_f64..0.1,
        volatility in 0.01_f64..1.0,
        expiry in 0.01_f64..3.0,
    ) {
        let call = price(spot, strike, rate, volatility, expiry, OptionSide::Call);
        let put = price(spot, strike, rate, volatility, expiry, OptionSide::Put);
        let parity = spot - strike * (-rate * expiry).exp();
        prop_assert!(
            (call - put - parity).abs() < 1e-9,
            "C - P = {} but S - K·e^(-rT) = {}", call - put, parity
        );
    }

    #[test]
    fn test_price_is_discounted_black(
        spot in 0.01_f64..2.0,
        strike in 0.5_f64..1.5,
        rate in -0.02_f64..0.1,
        volatility in 0.0_f64..1.0,
        expiry in 0.01_f64..2.0,
        side in side_strategy(),
    ) {
        let forward = spot * (rate * expiry).exp();
        let total_std_dev = volatility * expiry.sqrt();
        let expected = (-rate * expiry).exp() * black(forward, strike, total_std_dev, side);
        let actual = price(spot, strike, rate, volatility, expiry, side);
        prop_assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn test_price_bounds(
        spot in 0.01_f64..2.0,
        strike in 0.5_f64..1.5,
        rate in 0.0_f64..0.1,
        volatility in 0.01_f64..1.0,
        expiry in 0.01_f64..2.0,
        side in side_strategy(),
    ) {
        let value = price(spot, strike, rate, volatility, expiry, side);
        let discount = (-rate * expiry).exp();
        let lower = (side.phi() * (spot - strike * discount)).max(0.0);
        let upper = if side.is_call() { spot } else { strike * discount };
        prop_assert!(value >= lower - 1e-12);
        prop_assert!(value <= upper + 1e-12);
    }

    #[test]
    fn test_implied_vol_round_trip(
        volatility in 0.05_f64..1.0,
        expiry in 0.1_f64..2.0,
        moneyness in 0.95_f64..1.05,
        side in side_strategy(),
    ) {
        let forward = 1.0;
        let strike = moneyness * forward;
        let target = black(forward, strike, volatility * expiry.sqrt(), side);
        let implied = implied_vol(target, strike, forward, expiry, side).unwrap();
        prop_assert!(
            (implied - volatility).abs() < 1e-6,
            "σ = {}, recovered {}", volatility, implied
        );
    }

    #[test]
    fn test_premium_round_trip(
        volatility in 0.05_f64..1.0,
        expiry in 0.1_f64..2.0,
        rate in 0.0_f64..0.08,
        moneyness in 0.95_f64..1.05,
        side in side_strategy(),
    ) {
        let spot = 100.0;
        let strike = moneyness * spot * (rate * expiry).exp();
        let premium = price(spot, strike, rate, volatility, expiry, side);
        let implied = implied_vol_from_premium(premium, spot, strike, rate, expiry, side).unwrap();
        prop_assert!((implied - volatility).abs() < 1e-6);
    }
}

#[test]
fn test_zero_volatility_is_discounted_intrinsic() {
    for &spot in &[0.5_f64, 0.9, 1.0, 1.1, 2.0] {
        for side in OptionSide::ALL {
            let (strike, rate, expiry) = (1.0_f64, 0.05_f64, 1.4_f64);
            let forward = spot * (rate * expiry).exp();
            let expected = (-rate * expiry).exp() * (side.phi() * (forward - strike)).max(0.0);
            assert_eq!(price(spot, strike, rate, 0.0, expiry, side), expected);

            let model = BlackScholes::new(MarketParameters::new(spot, rate, 0.0).unwrap());
            let option = OptionSpec::new(strike, expiry, side).unwrap();
            let result = model.price_with_greeks(&option);
            assert!(!result.has_greeks());
            assert_eq!(result.delta, None);
            assert_eq!(result.vega, None);
        }
    }
}

#[test]
fn test_end_to_end_parity_example() {
    let call = price(1.0, 1.0, 0.05, 0.30, 1.4, OptionSide::Call);
    let put = price(1.0, 1.0, 0.05, 0.30, 1.4, OptionSide::Put);
    assert_relative_eq!(call - put, 1.0 - (-0.07_f64).exp(), epsilon = 1e-12);
    assert_relative_eq!(call - put, 0.06761, epsilon = 1e-4);
}

#[test]
fn test_quotes_for_a_smile() {
    let (spot, rate, expiry) = (1.0_f64, 0.05_f64, 1.4_f64);
    let quotes: Vec<ImpliedVolQuote> = [0.8, 0.9, 1.0, 1.1, 1.2]
        .iter()
        .map(|&strike| {
            let premium = price(spot, strike, rate, 0.3, expiry, OptionSide::Call);
            ImpliedVolQuote::from_result(implied_vol_from_premium(
                premium,
                spot,
                strike,
                rate,
                expiry,
                OptionSide::Call,
            ))
        })
        .collect();

    for quote in quotes {
        assert_relative_eq!(quote.value().unwrap(), 0.3, epsilon = 1e-7);
    }
}
