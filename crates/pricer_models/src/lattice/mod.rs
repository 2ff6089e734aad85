//! Recombining binomial lattices.
//!
//! This module provides:
//! - `LatticeModel`: Cox-Ross-Rubinstein style tree with per-step relative
//!   moves `d` (down) and `u` (up) and per-step rate `r`
//! - Closed-form grid levels, exhaustive move/path enumeration, terminal
//!   histograms and European backward induction
//! - `DiffusionApproximation`: the continuous-time parameters implied by a tree
//!
//! Path enumeration is exponential in the step count and is capped at
//! [`MAX_ENUMERATION_STEPS`]. Grid levels and backward induction are not.

pub mod crr;
pub mod error;

pub use crr::{DiffusionApproximation, LatticeModel, MAX_ENUMERATION_STEPS};
pub use error::LatticeError;
