//! Option side and intrinsic payoff.

use std::fmt;

/// Side of a vanilla option.
///
/// Closed-form formulas are written once in terms of the sign
/// `φ = +1` (call) / `φ = -1` (put), exposed by [`OptionSide::phi`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionSide;
///
/// assert_eq!(OptionSide::Call.phi(), 1.0);
/// assert_eq!(OptionSide::Put.intrinsic(90.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OptionSide {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionSide {
    /// Both sides, calls first.
    pub const ALL: [OptionSide; 2] = [OptionSide::Call, OptionSide::Put];

    /// Returns the sign `φ`: `+1` for calls, `-1` for puts.
    #[inline]
    pub fn phi(self) -> f64 {
        match self {
            OptionSide::Call => 1.0,
            OptionSide::Put => -1.0,
        }
    }

    /// Maps a sign `φ ∈ {+1, -1}` back to a side.
    ///
    /// Returns `None` for any other value.
    pub fn from_phi(phi: i8) -> Option<Self> {
        match phi {
            1 => Some(OptionSide::Call),
            -1 => Some(OptionSide::Put),
            _ => None,
        }
    }

    /// Returns true for calls.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// Intrinsic value `max(φ(underlying - strike), 0)`.
    #[inline]
    pub fn intrinsic(self, underlying: f64, strike: f64) -> f64 {
        (self.phi() * (underlying - strike)).max(0.0)
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSide::Call => write!(f, "call"),
            OptionSide::Put => write!(f, "put"),
        }
    }
}
