//! Error types for lattice construction and evaluation.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Binomial lattice errors.
///
/// # Examples
/// ```
/// use pricer_models::lattice::{LatticeError, LatticeModel};
///
/// let err = LatticeModel::new(100.0, 0.01, -1.5, 0.1, 1.0, 10).unwrap_err();
/// assert!(matches!(err, LatticeError::InvalidLatticeParameters { .. }));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Tree parameters violate `N ≥ 1`, `d > -1`, `u > d`, `S0 > 0`, `T > 0`.
    #[error("Invalid lattice parameters: {reason}")]
    InvalidLatticeParameters {
        /// Which constraint failed
        reason: String,
    },

    /// Exhaustive enumeration requested for too many steps.
    #[error("Cannot enumerate 2^{steps} paths (limit is 2^{max})")]
    EnumerationTooLarge {
        /// Requested depth
        steps: usize,
        /// Maximum supported depth
        max: usize,
    },

    /// The per-step rate does not lie strictly between the moves.
    #[error(
        "Per-step rate {rate} admits arbitrage against moves d = {down}, u = {up}"
    )]
    ArbitrageableRate {
        /// Per-step rate `r`
        rate: f64,
        /// Down move `d`
        down: f64,
        /// Up move `u`
        up: f64,
    },

    /// Strike is not a positive finite number.
    #[error("Invalid strike: {strike}")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },
}

impl LatticeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LatticeError::InvalidLatticeParameters {
            reason: reason.into(),
        }
    }
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::InvalidLatticeParameters { .. } | LatticeError::InvalidStrike { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            LatticeError::EnumerationTooLarge { .. } | LatticeError::ArbitrageableRate { .. } => {
                PricingError::ModelFailure(err.to_string())
            }
        }
    }
}
