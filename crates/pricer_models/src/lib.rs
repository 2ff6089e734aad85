//! # Pricer Models
//!
//! European option analytics and the models around them.
//!
//! This crate provides:
//! - Black-Scholes prices, Greeks and implied volatility (`analytical`)
//! - Validated market and option value objects (`instruments`)
//! - A recombining Cox-Ross-Rubinstein lattice (`lattice`)
//! - Brownian and geometric Brownian path sampling (`models`)
//!
//! ## Design Principles
//!
//! - **Pure functions** over numeric inputs; every value object is immutable
//! - **Explicit failures**: invalid parameters and root-finding failures are
//!   returned as typed errors, never silently replaced
//! - **Local fallbacks** only for zero variance, where prices collapse to
//!   intrinsic value
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::{implied_vol_from_premium, price};
//! use pricer_models::instruments::OptionSide;
//!
//! let call = price(1.0, 1.0, 0.05, 0.3, 1.4, OptionSide::Call);
//! let put = price(1.0, 1.0, 0.05, 0.3, 1.4, OptionSide::Put);
//! assert!((call - put - (1.0 - (-0.07_f64).exp())).abs() < 1e-12);
//!
//! let sigma = implied_vol_from_premium(call, 1.0, 1.0, 0.05, 1.4, OptionSide::Call).unwrap();
//! assert!((sigma - 0.3).abs() < 1e-7);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod lattice;
pub mod models;
