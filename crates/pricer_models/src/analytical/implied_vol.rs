//! Implied volatility inversion of the Black formula.
//!
//! The inversion works on the undiscounted forward price: it finds the total
//! standard deviation `ν` such that `black(F, K, ν, φ) = price` inside the
//! bracket `[lower·√T, upper·√T]` using Brent's method, then returns `ν/√T`.
//!
//! Failures are never swallowed. [`ImpliedVolQuote`] turns a failed inversion
//! into an explicit "unavailable" value with a reason code for reporting.

use std::fmt;

use pricer_core::math::solvers::{BrentSolver, SolverConfig};
use tracing::debug;

use super::black_scholes::black;
use super::error::{AnalyticalError, BracketSide};
use crate::instruments::OptionSide;

/// Bracket and tolerance settings for implied volatility inversion.
///
/// # Examples
/// ```
/// use pricer_models::analytical::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.lower, 0.01);
/// assert_eq!(config.upper, 1.0);
/// assert_eq!(config.tolerance, 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Lower volatility bound (annualised)
    pub lower: f64,
    /// Upper volatility bound (annualised)
    pub upper: f64,
    /// Absolute tolerance on the total standard deviation `ν`
    pub tolerance: f64,
    /// Maximum root-finder iterations
    pub max_iterations: usize,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            lower: 0.01,
            upper: 1.0,
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

/// Implied volatility solver over a fixed bracket.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{black, ImpliedVolSolver};
/// use pricer_models::instruments::OptionSide;
///
/// let solver = ImpliedVolSolver::default();
/// let target = black(100.0, 105.0, 0.25 * 0.5_f64.sqrt(), OptionSide::Call);
///
/// let sigma = solver.solve(target, 105.0, 100.0, 0.5, OptionSide::Call).unwrap();
/// assert!((sigma - 0.25).abs() < 1e-7);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
    solver: BrentSolver<f64>,
}

impl Default for ImpliedVolSolver {
    fn default() -> Self {
        Self::new(ImpliedVolConfig::default())
    }
}

impl ImpliedVolSolver {
    /// Creates a solver with the given bracket settings.
    pub fn new(config: ImpliedVolConfig) -> Self {
        let solver = BrentSolver::new(SolverConfig {
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        });
        Self { config, solver }
    }

    /// Returns the bracket settings.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    fn validate(
        &self,
        price: f64,
        strike: f64,
        forward: f64,
        expiry: f64,
    ) -> Result<(), AnalyticalError> {
        let checks = [
            ("price", price, price.is_finite()),
            ("strike", strike, strike.is_finite() && strike > 0.0),
            ("forward", forward, forward.is_finite() && forward > 0.0),
            ("expiry", expiry, expiry.is_finite() && expiry > 0.0),
        ];
        for (name, value, ok) in checks {
            if !ok {
                return Err(AnalyticalError::InvalidModelParameter { name, value });
            }
        }

        let bounds_ok = self.config.lower > 0.0
            && self.config.upper > self.config.lower
            && self.config.tolerance > 0.0
            && self.config.max_iterations > 0;
        if !bounds_ok {
            return Err(AnalyticalError::InvalidModelParameter {
                name: "implied_vol_bracket",
                value: self.config.upper - self.config.lower,
            });
        }
        Ok(())
    }

    /// Inverts an undiscounted (forward) option price.
    ///
    /// # Arguments
    /// * `price` - Undiscounted option price
    /// * `strike` - Strike `K`
    /// * `forward` - Forward `F`
    /// * `expiry` - Maturity `T` in years
    /// * `side` - Call or put
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidModelParameter` for non-positive inputs
    /// - `AnalyticalError::NoRootInBracket` if the price is outside the range
    ///   reachable with volatilities in `[lower, upper]`
    /// - `AnalyticalError::SolverFailure` if Brent's method fails to converge
    pub fn solve(
        &self,
        price: f64,
        strike: f64,
        forward: f64,
        expiry: f64,
        side: OptionSide,
    ) -> Result<f64, AnalyticalError> {
        self.validate(price, strike, forward, expiry)?;

        let sqrt_t = expiry.sqrt();
        let nu_lower = self.config.lower * sqrt_t;
        let nu_upper = self.config.upper * sqrt_t;
        let objective = |nu: f64| black(forward, strike, nu, side) - price;

        let at_lower = objective(nu_lower);
        let at_upper = objective(nu_upper);
        let side_of_range = if at_lower > 0.0 {
            Some(BracketSide::BelowRange)
        } else if at_upper < 0.0 {
            Some(BracketSide::AboveRange)
        } else {
            None
        };

        if let Some(bracket_side) = side_of_range {
            debug!(
                price,
                strike,
                forward,
                expiry,
                %side,
                side_of_range = %bracket_side,
                "implied volatility outside bracket"
            );
            return Err(AnalyticalError::NoRootInBracket {
                price,
                lower: self.config.lower,
                upper: self.config.upper,
                side: bracket_side,
            });
        }

        let nu = self.solver.find_root(objective, nu_lower, nu_upper)?;
        Ok(nu / sqrt_t)
    }

    /// Inverts a discounted premium on a spot asset.
    ///
    /// Converts to the forward measure (`F = S·e^(rT)`, undiscounted price
    /// `premium·e^(rT)`) and calls [`ImpliedVolSolver::solve`].
    pub fn solve_premium(
        &self,
        premium: f64,
        spot: f64,
        strike: f64,
        rate: f64,
        expiry: f64,
        side: OptionSide,
    ) -> Result<f64, AnalyticalError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AnalyticalError::InvalidModelParameter {
                name: "spot",
                value: spot,
            });
        }
        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidModelParameter {
                name: "rate",
                value: rate,
            });
        }
        let growth = (rate * expiry).exp();
        self.solve(premium * growth, strike, spot * growth, expiry, side)
    }
}

/// Inverts an undiscounted price with the default bracket `[0.01, 1.00]`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{black, implied_vol, AnalyticalError};
/// use pricer_models::instruments::OptionSide;
///
/// let target = black(1.0, 1.0, 0.3 * 2.0_f64.sqrt(), OptionSide::Put);
/// assert!((implied_vol(target, 1.0, 1.0, 2.0, OptionSide::Put).unwrap() - 0.3).abs() < 1e-7);
///
/// // A put can never be worth more than its strike
/// assert!(matches!(
///     implied_vol(2.0, 1.0, 1.0, 2.0, OptionSide::Put),
///     Err(AnalyticalError::NoRootInBracket { .. })
/// ));
/// ```
pub fn implied_vol(
    price: f64,
    strike: f64,
    forward: f64,
    expiry: f64,
    side: OptionSide,
) -> Result<f64, AnalyticalError> {
    ImpliedVolSolver::default().solve(price, strike, forward, expiry, side)
}

/// Inverts a discounted spot premium with the default bracket.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{implied_vol_from_premium, price};
/// use pricer_models::instruments::OptionSide;
///
/// let premium = price(1.0, 1.1, 0.05, 0.3, 1.4, OptionSide::Call);
/// let sigma = implied_vol_from_premium(premium, 1.0, 1.1, 0.05, 1.4, OptionSide::Call).unwrap();
/// assert!((sigma - 0.3).abs() < 1e-7);
/// ```
pub fn implied_vol_from_premium(
    premium: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    side: OptionSide,
) -> Result<f64, AnalyticalError> {
    ImpliedVolSolver::default().solve_premium(premium, spot, strike, rate, expiry, side)
}

/// Why an implied volatility could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum UnavailableReason {
    /// No usable market price (missing or crossed quote).
    MissingQuote,
    /// Price below the value at the lower volatility bound.
    PriceBelowRange,
    /// Price above the value at the upper volatility bound.
    PriceAboveRange,
    /// Root finder did not converge.
    NotConverged,
    /// Inputs outside the model domain.
    InvalidInput,
}

impl UnavailableReason {
    /// Short machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            UnavailableReason::MissingQuote => "missing_quote",
            UnavailableReason::PriceBelowRange => "price_below_range",
            UnavailableReason::PriceAboveRange => "price_above_range",
            UnavailableReason::NotConverged => "not_converged",
            UnavailableReason::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of an implied volatility lookup for reporting.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{implied_vol, ImpliedVolQuote, UnavailableReason};
/// use pricer_models::instruments::OptionSide;
///
/// let quote = ImpliedVolQuote::from_result(implied_vol(5.0, 1.0, 1.0, 1.0, OptionSide::Call));
/// assert_eq!(quote, ImpliedVolQuote::Unavailable(UnavailableReason::PriceAboveRange));
/// assert_eq!(quote.value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ImpliedVolQuote {
    /// Implied volatility found.
    Available(f64),
    /// No implied volatility, with the reason.
    Unavailable(UnavailableReason),
}

impl ImpliedVolQuote {
    /// Maps an inversion result onto a quote.
    pub fn from_result(result: Result<f64, AnalyticalError>) -> Self {
        match result {
            Ok(sigma) => ImpliedVolQuote::Available(sigma),
            Err(AnalyticalError::NoRootInBracket {
                side: BracketSide::BelowRange,
                ..
            }) => ImpliedVolQuote::Unavailable(UnavailableReason::PriceBelowRange),
            Err(AnalyticalError::NoRootInBracket {
                side: BracketSide::AboveRange,
                ..
            }) => ImpliedVolQuote::Unavailable(UnavailableReason::PriceAboveRange),
            Err(AnalyticalError::SolverFailure(_)) => {
                ImpliedVolQuote::Unavailable(UnavailableReason::NotConverged)
            }
            Err(AnalyticalError::InvalidModelParameter { .. }) => {
                ImpliedVolQuote::Unavailable(UnavailableReason::InvalidInput)
            }
        }
    }

    /// Returns the volatility if available.
    pub fn value(&self) -> Option<f64> {
        match self {
            ImpliedVolQuote::Available(sigma) => Some(*sigma),
            ImpliedVolQuote::Unavailable(_) => None,
        }
    }

    /// Returns the reason if unavailable.
    pub fn reason(&self) -> Option<UnavailableReason> {
        match self {
            ImpliedVolQuote::Available(_) => None,
            ImpliedVolQuote::Unavailable(reason) => Some(*reason),
        }
    }

    /// Returns true when a volatility is available.
    pub fn is_available(&self) -> bool {
        matches!(self, ImpliedVolQuote::Available(_))
    }
}
