//! Geometric Brownian Motion (GBM) model implementation.
//!
//! GBM is described by:
//! ```text
//! dS = r * S * dt + sigma * S * dW
//! ```
//! Paths are generated with the exact log-space solution
//! ```text
//! S(t+dt) = S(t) * exp((r - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```
//! so there is no discretisation bias at the grid points.

use tracing::debug;

use super::brownian::TimeGrid;
use super::rng::PathRng;

/// Risk-neutral geometric Brownian motion.
///
/// # Examples
/// ```
/// use pricer_models::models::{GeometricBrownianMotion, PathRng, TimeGrid};
///
/// let gbm = GeometricBrownianMotion::new(100.0, 0.05, 0.2).unwrap();
/// let grid = TimeGrid::new(1.0, 252).unwrap();
/// let path = gbm.sample_path(&grid, &mut PathRng::from_seed(42));
///
/// assert_eq!(path.len(), 253);
/// assert_eq!(path[0], 100.0);
/// assert!(path.iter().all(|s| *s > 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometricBrownianMotion {
    /// Initial spot price
    pub spot: f64,
    /// Risk-free rate (annualised)
    pub rate: f64,
    /// Volatility (annualised)
    pub volatility: f64,
}

impl GeometricBrownianMotion {
    /// Create new GBM parameters with validation.
    ///
    /// # Returns
    /// `Some` if `spot > 0`, `volatility ≥ 0` and all inputs are finite.
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Option<Self> {
        let finite = spot.is_finite() && rate.is_finite() && volatility.is_finite();
        if !finite || spot <= 0.0 || volatility < 0.0 {
            return None;
        }
        Some(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Advances `level` by `dt` given a standard normal shock `z`.
    #[inline]
    pub fn step(&self, level: f64, dt: f64, z: f64) -> f64 {
        let drift = (self.rate - 0.5 * self.volatility * self.volatility) * dt;
        let diffusion = self.volatility * dt.sqrt() * z;
        level * (drift + diffusion).exp()
    }

    /// Expected level `S0·e^(rt)` under the risk-neutral measure.
    #[inline]
    pub fn expected(&self, t: f64) -> f64 {
        self.spot * (self.rate * t).exp()
    }

    /// Samples one path on `grid`, starting at the spot.
    pub fn sample_path(&self, grid: &TimeGrid, rng: &mut PathRng) -> Vec<f64> {
        let dt = grid.dt();
        let mut path = Vec::with_capacity(grid.steps() + 1);
        let mut level = self.spot;
        path.push(level);
        for _ in 0..grid.steps() {
            level = self.step(level, dt, rng.gen_normal());
            path.push(level);
        }
        path
    }

    /// Samples `count` independent paths on `grid`.
    pub fn sample_paths(&self, grid: &TimeGrid, rng: &mut PathRng, count: usize) -> Vec<Vec<f64>> {
        debug!(
            count,
            steps = grid.steps(),
            seed = rng.seed(),
            "sampling geometric Brownian paths"
        );
        (0..count).map(|_| self.sample_path(grid, rng)).collect()
    }
}
