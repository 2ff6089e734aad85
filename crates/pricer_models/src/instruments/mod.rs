//! Market and instrument value objects.
//!
//! This module provides:
//! - [`MarketParameters`]: spot, continuously compounded rate and volatility
//! - [`OptionSpec`]: strike, maturity and side of a European option
//! - [`OptionSide`]: call/put with the `φ = ±1` sign convention
//!
//! All types validate on construction and are immutable afterwards.

pub mod params;
pub mod payoff;

pub use params::{MarketParameters, OptionSpec};
pub use payoff::OptionSide;
