//! Market and option parameters.
//!
//! This module provides validated value objects for a single pricing run.

use super::payoff::OptionSide;
use crate::analytical::AnalyticalError;

fn require_finite(name: &'static str, value: f64) -> Result<f64, AnalyticalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticalError::InvalidModelParameter { name, value })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<f64, AnalyticalError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AnalyticalError::InvalidModelParameter { name, value })
    }
}

/// Market state for a Black-Scholes pricing run.
///
/// # Examples
/// ```
/// use pricer_models::instruments::MarketParameters;
///
/// let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
/// assert_eq!(market.spot(), 100.0);
///
/// // Negative rates are allowed, negative volatility is not
/// assert!(MarketParameters::new(100.0, -0.01, 0.2).is_ok());
/// assert!(MarketParameters::new(100.0, 0.05, -0.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl MarketParameters {
    /// Creates validated market parameters.
    ///
    /// # Arguments
    /// * `spot` - Spot price `S0` (must be positive)
    /// * `rate` - Continuously compounded risk-free rate (may be negative)
    /// * `volatility` - Annualised volatility (must be non-negative)
    ///
    /// # Errors
    /// `AnalyticalError::InvalidModelParameter` naming the offending field.
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        let spot = require_positive("spot", spot)?;
        let rate = require_finite("rate", rate)?;
        let volatility = require_finite("volatility", volatility)?;
        if volatility < 0.0 {
            return Err(AnalyticalError::InvalidModelParameter {
                name: "volatility",
                value: volatility,
            });
        }

        Ok(Self {
            spot,
            rate,
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

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Forward price `S0·e^{rT}`.
    #[inline]
    pub fn forward(&self, expiry: f64) -> f64 {
        self.spot * (self.rate * expiry).exp()
    }

    /// Discount factor `e^{-rT}`.
    #[inline]
    pub fn discount_factor(&self, expiry: f64) -> f64 {
        (-self.rate * expiry).exp()
    }

    /// Total standard deviation `σ√T`.
    #[inline]
    pub fn total_std_dev(&self, expiry: f64) -> f64 {
        self.volatility * expiry.sqrt()
    }
}

/// A European vanilla option.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionSide, OptionSpec};
///
/// let option = OptionSpec::new(100.0, 1.0, OptionSide::Call).unwrap();
/// assert_eq!(option.phi(), 1.0);
///
/// assert!(OptionSpec::new(100.0, 0.0, OptionSide::Put).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    strike: f64,
    expiry: f64,
    side: OptionSide,
}

impl OptionSpec {
    /// Creates a validated option.
    ///
    /// # Arguments
    /// * `strike` - Strike `K` (must be positive)
    /// * `expiry` - Maturity `T` as a year fraction (must be positive)
    /// * `side` - Call or put
    pub fn new(strike: f64, expiry: f64, side: OptionSide) -> Result<Self, AnalyticalError> {
        Ok(Self {
            strike: require_positive("strike", strike)?,
            expiry: require_positive("expiry", expiry)?,
            side,
        })
    }

    /// Convenience constructor for a call.
    pub fn call(strike: f64, expiry: f64) -> Result<Self, AnalyticalError> {
        Self::new(strike, expiry, OptionSide::Call)
    }

    /// Convenience constructor for a put.
    pub fn put(strike: f64, expiry: f64) -> Result<Self, AnalyticalError> {
        Self::new(strike, expiry, OptionSide::Put)
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the maturity in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the option side.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// Returns the sign `φ` of the option side.
    #[inline]
    pub fn phi(&self) -> f64 {
        self.side.phi()
    }

    /// Returns the same option with the opposite side.
    pub fn with_side(&self, side: OptionSide) -> Self {
        Self { side, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_valid() {
        let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
        assert_eq!(market.spot(), 100.0);
        assert_eq!(market.rate(), 0.05);
        assert_eq!(market.volatility(), 0.2);
    }

    #[test]
    fn test_market_zero_volatility_allowed() {
        assert!(MarketParameters::new(100.0, 0.05, 0.0).is_ok());
    }

    #[test]
    fn test_market_invalid_spot() {
        for spot in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            match MarketParameters::new(spot, 0.05, 0.2) {
                Err(AnalyticalError::InvalidModelParameter { name, .. }) => {
                    assert_eq!(name, "spot")
                }
                other => panic!("Expected InvalidModelParameter, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_market_invalid_volatility() {
        match MarketParameters::new(100.0, 0.05, -0.2) {
            Err(AnalyticalError::InvalidModelParameter { name, value }) => {
                assert_eq!(name, "volatility");
                assert_eq!(value, -0.2);
            }
            other => panic!("Expected InvalidModelParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_market_invalid_rate() {
        assert!(MarketParameters::new(100.0, f64::NAN, 0.2).is_err());
    }

    #[test]
    fn test_forward_and_discount() {
        let market = MarketParameters::new(100.0, 0.05, 0.2).unwrap();
        let t = 2.0;
        let discounted_forward = market.forward(t) * market.discount_factor(t);
        assert!((discounted_forward - 100.0).abs() < 1e-12);
        assert!((market.total_std_dev(4.0) - 0.4).abs() < 1e-15);
    }

    fn rejected(result: Result<OptionSpec, AnalyticalError>) -> &'static str {
        match result {
            Err(AnalyticalError::InvalidModelParameter { name, .. }) => name,
            other => panic!("Expected InvalidModelParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_option_invalid_strike_and_expiry() {
        assert_eq!(rejected(OptionSpec::call(0.0, 1.0)), "strike");
        assert_eq!(rejected(OptionSpec::put(100.0, -1.0)), "expiry");
    }

    #[test]
    fn test_option_with_side() {
        let call = OptionSpec::call(100.0, 1.0).unwrap();
        let put = call.with_side(OptionSide::Put);
        assert_eq!(put.side(), OptionSide::Put);
        assert_eq!(put.strike(), 100.0);
        assert_eq!(put.expiry(), 1.0);
    }
}
