//! Black-Scholes pricing model for European options.
//!
//! This module provides closed-form pricing and analytical Greeks for
//! European calls and puts, written once in terms of the side sign
//! `φ = +1` (call) / `φ = -1` (put).
//!
//! ## Mathematical Formulas
//!
//! **Black (forward) price**: `φ·[F·N(φd₁) − K·N(φd₂)]`
//! **Spot price**: `e^(−rT) · black(S·e^(rT), K, σ√T, φ)`
//!
//! Where:
//! - ν = σ√T (total standard deviation)
//! - d₁ = ln(F/K)/ν + ν/2
//! - d₂ = d₁ − ν
//!
//! When `ν < 1e-12` the formulas degenerate; prices fall back to the
//! (discounted) intrinsic value on the forward and the Greeks are undefined.

use tracing::debug;

use super::distributions::{norm_cdf, norm_pdf};
use crate::instruments::{MarketParameters, OptionSide, OptionSpec};

/// Total standard deviation below which the model is treated as deterministic.
pub const MIN_TOTAL_STD_DEV: f64 = 1e-12;

/// Undiscounted Black price on the forward.
///
/// Computes `φ·[F·N(φd₁) − K·N(φd₂)]`. For `ν < 1e-12` returns the intrinsic
/// value `max(φ(F − K), 0)` instead of dividing by a vanishing `ν`.
///
/// # Arguments
/// * `forward` - Forward price `F`
/// * `strike` - Strike `K`
/// * `total_std_dev` - `ν = σ√T`
/// * `side` - Call or put
///
/// # Examples
/// ```
/// use pricer_models::analytical::black;
/// use pricer_models::instruments::OptionSide;
///
/// let atm = black(100.0, 100.0, 0.2, OptionSide::Call);
/// assert!((atm - 7.965_567_455_405_804).abs() < 1e-10);
///
/// // Zero variance collapses to intrinsic value
/// assert_eq!(black(110.0, 100.0, 0.0, OptionSide::Call), 10.0);
/// ```
#[inline]
pub fn black(forward: f64, strike: f64, total_std_dev: f64, side: OptionSide) -> f64 {
    if total_std_dev < MIN_TOTAL_STD_DEV {
        return side.intrinsic(forward, strike);
    }

    let phi = side.phi();
    let d1 = (forward / strike).ln() / total_std_dev + 0.5 * total_std_dev;
    let d2 = d1 - total_std_dev;

    phi * (forward * norm_cdf(phi * d1) - strike * norm_cdf(phi * d2))
}

/// Black-Scholes price of a European option on a spot asset.
///
/// Discounts the forward `F = S·e^(rT)` through [`black`] with `ν = σ√T`.
/// Inputs are not validated; use [`BlackScholes`] for a checked interface.
///
/// # Examples
/// ```
/// use pricer_models::analytical::price;
/// use pricer_models::instruments::OptionSide;
///
/// let call = price(100.0, 100.0, 0.05, 0.2, 1.0, OptionSide::Call);
/// assert!((call - 10.450_583_572_185_565).abs() < 1e-9);
/// ```
#[inline]
pub fn price(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
    side: OptionSide,
) -> f64 {
    let forward = spot * (rate * expiry).exp();
    let discount = (-rate * expiry).exp();
    discount * black(forward, strike, volatility * expiry.sqrt(), side)
}

/// Price together with the analytical Greeks.
///
/// Each Greek is `None` when the total variance is too small for the
/// closed-form sensitivity to be defined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Option price
    pub price: f64,
    /// ∂V/∂S
    pub delta: Option<f64>,
    /// ∂²V/∂S²
    pub gamma: Option<f64>,
    /// −∂V/∂T
    pub theta: Option<f64>,
    /// ∂V/∂r
    pub rho: Option<f64>,
    /// ∂V/∂σ
    pub vega: Option<f64>,
}

impl PricingResult {
    /// Returns true when all Greeks are defined.
    pub fn has_greeks(&self) -> bool {
        self.delta.is_some()
            && self.gamma.is_some()
            && self.theta.is_some()
            && self.rho.is_some()
            && self.vega.is_some()
    }
}

/// Intermediate terms shared by all Greeks.
#[derive(Debug, Clone, Copy)]
struct Terms {
    d1: f64,
    d2: f64,
    total_std_dev: f64,
    sqrt_t: f64,
    discount: f64,
}

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::{MarketParameters, OptionSpec};
///
/// let bs = BlackScholes::new(MarketParameters::new(100.0, 0.05, 0.2).unwrap());
/// let call = OptionSpec::call(100.0, 1.0).unwrap();
/// let put = OptionSpec::put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = bs.price(&call) - bs.price(&put) - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    market: MarketParameters,
}

impl BlackScholes {
    /// Creates a model over validated market parameters.
    pub fn new(market: MarketParameters) -> Self {
        Self { market }
    }

    /// Returns the market parameters.
    #[inline]
    pub fn market(&self) -> &MarketParameters {
        &self.market
    }

    fn terms(&self, option: &OptionSpec) -> Option<Terms> {
        let expiry = option.expiry();
        let total_std_dev = self.market.total_std_dev(expiry);
        if total_std_dev < MIN_TOTAL_STD_DEV {
            debug!(
                volatility = self.market.volatility(),
                expiry,
                "total variance below threshold, Greeks undefined"
            );
            return None;
        }

        let forward = self.market.forward(expiry);
        let d1 = (forward / option.strike()).ln() / total_std_dev + 0.5 * total_std_dev;

        Some(Terms {
            d1,
            d2: d1 - total_std_dev,
            total_std_dev,
            sqrt_t: expiry.sqrt(),
            discount: self.market.discount_factor(expiry),
        })
    }

    /// Computes the d1 term, or `None` for vanishing total variance.
    pub fn d1(&self, option: &OptionSpec) -> Option<f64> {
        self.terms(option).map(|t| t.d1)
    }

    /// Computes the d2 term, or `None` for vanishing total variance.
    pub fn d2(&self, option: &OptionSpec) -> Option<f64> {
        self.terms(option).map(|t| t.d2)
    }

    /// Computes the option price.
    pub fn price(&self, option: &OptionSpec) -> f64 {
        price(
            self.market.spot(),
            option.strike(),
            self.market.rate(),
            self.market.volatility(),
            option.expiry(),
            option.side(),
        )
    }

    /// Computes Delta (∂V/∂S) = φ·N(φd₁).
    pub fn delta(&self, option: &OptionSpec) -> Option<f64> {
        let phi = option.phi();
        self.terms(option).map(|t| phi * norm_cdf(phi * t.d1))
    }

    /// Computes Gamma (∂²V/∂S²) = φ'(d₁)/(S·ν).
    ///
    /// Gamma is the same for both calls and puts.
    pub fn gamma(&self, option: &OptionSpec) -> Option<f64> {
        let t = self.terms(option)?;
        Some(norm_pdf(t.d1) / (self.market.spot() * t.total_std_dev))
    }

    /// Computes Theta as the negative derivative with respect to maturity.
    ///
    /// Theta = −S·φ'(d₁)·σ/(2√T) − φ·r·K·e^(−rT)·N(φd₂)
    pub fn theta(&self, option: &OptionSpec) -> Option<f64> {
        let phi = option.phi();
        let spot = self.market.spot();
        let rate = self.market.rate();
        let volatility = self.market.volatility();
        let strike = option.strike();

        self.terms(option).map(|t| {
            let decay = -spot * norm_pdf(t.d1) * volatility / (2.0 * t.sqrt_t);
            let carry = -phi * rate * strike * t.discount * norm_cdf(phi * t.d2);
            decay + carry
        })
    }

    /// Computes Rho (∂V/∂r) = φ·K·T·e^(−rT)·N(φd₂).
    pub fn rho(&self, option: &OptionSpec) -> Option<f64> {
        let phi = option.phi();
        let t = self.terms(option)?;
        let weight = option.strike() * option.expiry() * t.discount;
        Some(phi * weight * norm_cdf(phi * t.d2))
    }

    /// Computes Vega (∂V/∂σ) = S·φ'(d₁)·√T.
    ///
    /// Vega is the same for both calls and puts.
    pub fn vega(&self, option: &OptionSpec) -> Option<f64> {
        let t = self.terms(option)?;
        Some(self.market.spot() * norm_pdf(t.d1) * t.sqrt_t)
    }

    /// Computes the price and every Greek in one pass.
    pub fn price_with_greeks(&self, option: &OptionSpec) -> PricingResult {
        PricingResult {
            price: self.price(option),
            delta: self.delta(option),
            gamma: self.gamma(option),
            theta: self.theta(option),
            rho: self.rho(option),
            vega: self.vega(option),
        }
    }
}
