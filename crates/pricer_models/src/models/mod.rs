//! Stochastic process illustrations.
//!
//! This module provides:
//! - `PathRng`: seeded standard normal source
//! - `BrownianMotion` on a uniform `TimeGrid`, with discrete Itô and
//!   Stratonovich sums and realised quadratic variation
//! - `GeometricBrownianMotion`: exact log-space path sampling
//!
//! Everything is single-threaded and reproducible per seed.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{BrownianMotion, PathRng, stratonovich_integral};
//!
//! let motion = BrownianMotion::new(1.0, 100).unwrap();
//! let path = motion.sample_path(&mut PathRng::from_seed(1));
//! let w_t = path[100];
//! assert!((stratonovich_integral(&path) - 0.5 * w_t * w_t).abs() < 1e-12);
//! ```

pub mod brownian;
pub mod gbm;
pub mod rng;

pub use brownian::{
    ito_integral, quadratic_variation, stratonovich_integral, BrownianMotion, TimeGrid,
};
pub use gbm::GeometricBrownianMotion;
pub use rng::PathRng;
