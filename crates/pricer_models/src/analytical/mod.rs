//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - The Black formula on the forward and the Black-Scholes spot price
//! - Analytical Greeks (Delta, Gamma, Theta, Rho, Vega)
//! - Implied volatility inversion via Brent's method
//!
//! Normal CDF evaluation is erfc-based for accuracy deep in the tails.

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod implied_vol;

pub use black_scholes::{black, price, BlackScholes, PricingResult, MIN_TOTAL_STD_DEV};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::{AnalyticalError, BracketSide};
pub use implied_vol::{
    implied_vol, implied_vol_from_premium, ImpliedVolConfig, ImpliedVolQuote, ImpliedVolSolver,
    UnavailableReason,
};
