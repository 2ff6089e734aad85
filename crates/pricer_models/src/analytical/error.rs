//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to closed-form pricing and inversion
//! - `BracketSide`: Which side of the achievable price range a quote fell on

use std::fmt;

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Position of a quoted price relative to the prices reachable inside the
/// implied-volatility bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BracketSide {
    /// Price is below the value at the lower volatility bound (e.g. below intrinsic).
    BelowRange,
    /// Price is above the value at the upper volatility bound.
    AboveRange,
}

impl fmt::Display for BracketSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketSide::BelowRange => write!(f, "below"),
            BracketSide::AboveRange => write!(f, "above"),
        }
    }
}

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidModelParameter`: A model or instrument parameter is out of its domain
/// - `NoRootInBracket`: Implied volatility inversion has no root in the bracket
/// - `SolverFailure`: Root finder failed for another reason
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidModelParameter { name: "volatility", value: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// A parameter is outside its admissible domain.
    #[error("Invalid model parameter: {name} = {value}")]
    InvalidModelParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The quoted price cannot be reproduced by any volatility in the bracket.
    #[error(
        "No implied volatility in [{lower}, {upper}]: price {price} is {side} the achievable range"
    )]
    NoRootInBracket {
        /// Undiscounted option price that was inverted
        price: f64,
        /// Lower volatility bound
        lower: f64,
        /// Upper volatility bound
        upper: f64,
        /// Which side of the achievable range the price lies on
        side: BracketSide,
    },

    /// The root finder failed after a valid bracket was found.
    #[error("Root finder failed: {0}")]
    SolverFailure(#[from] SolverError),
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidModelParameter { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            AnalyticalError::NoRootInBracket { .. } => PricingError::ModelFailure(err.to_string()),
            AnalyticalError::SolverFailure(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}
