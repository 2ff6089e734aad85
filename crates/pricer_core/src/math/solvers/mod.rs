//! Root-finding solvers for numerical computation.
//!
//! Used for implied volatility inversion, where the objective is monotone on
//! a known bracket but its derivative (vega) can vanish in the wings, so a
//! bracketing method is preferred over Newton iteration.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Absolute tolerance on the root location (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
//! let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
//! assert!((root - 2.0_f64.ln()).abs() < 1e-11);
//! ```

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
