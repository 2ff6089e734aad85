//! Brownian paths and discrete stochastic integrals.
//!
//! For a sampled path `W_0, …, W_n` the discrete sums satisfy, exactly up to
//! rounding:
//! ```text
//! Itô:           Σ W_i (W_{i+1} − W_i)                = (W_n² − W_0² − QV) / 2
//! Stratonovich:  Σ ½(W_i + W_{i+1}) (W_{i+1} − W_i)   = (W_n² − W_0²) / 2
//! ```
//! where `QV = Σ (W_{i+1} − W_i)²` tends to `T` as the grid is refined.

use super::rng::PathRng;

/// Uniform time grid `0 = t_0 < … < t_n = T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    maturity: f64,
    steps: usize,
}

impl TimeGrid {
    /// Creates a grid with `steps` intervals over `[0, maturity]`.
    ///
    /// # Returns
    /// `None` unless `maturity` is positive and finite and `steps ≥ 1`.
    pub fn new(maturity: f64, steps: usize) -> Option<Self> {
        if !(maturity.is_finite() && maturity > 0.0) || steps == 0 {
            return None;
        }
        Some(Self { maturity, steps })
    }

    /// Returns the horizon `T`.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the number of intervals.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Interval length `T / n`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.steps as f64
    }

    /// The `n + 1` grid times.
    pub fn times(&self) -> Vec<f64> {
        let (maturity, n) = (self.maturity, self.steps as f64);
        (0..=self.steps).map(|k| maturity * k as f64 / n).collect()
    }
}

/// Standard Brownian motion sampled on a [`TimeGrid`].
///
/// # Examples
/// ```
/// use pricer_models::models::{BrownianMotion, PathRng, ito_integral, quadratic_variation};
///
/// let motion = BrownianMotion::new(1.0, 1_000).unwrap();
/// let mut rng = PathRng::from_seed(11);
/// let path = motion.sample_path(&mut rng);
///
/// assert_eq!(path.len(), 1_001);
/// assert_eq!(path[0], 0.0);
///
/// let w_t = path[1_000];
/// let identity = 0.5 * (w_t * w_t - quadratic_variation(&path));
/// assert!((ito_integral(&path) - identity).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrownianMotion {
    grid: TimeGrid,
}

impl BrownianMotion {
    /// Creates a Brownian motion on `steps` intervals over `[0, maturity]`.
    pub fn new(maturity: f64, steps: usize) -> Option<Self> {
        TimeGrid::new(maturity, steps).map(Self::on_grid)
    }

    /// Creates a Brownian motion on an existing grid.
    pub fn on_grid(grid: TimeGrid) -> Self {
        Self { grid }
    }

    /// Returns the sampling grid.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Returns the grid times.
    pub fn times(&self) -> Vec<f64> {
        self.grid.times()
    }

    /// Samples `W_0 = 0, W_{k+1} = W_k + √Δt·Z_k`.
    pub fn sample_path(&self, rng: &mut PathRng) -> Vec<f64> {
        let sqrt_dt = self.grid.dt().sqrt();
        let mut path = Vec::with_capacity(self.grid.steps() + 1);
        let mut level = 0.0;
        path.push(level);
        for _ in 0..self.grid.steps() {
            level += sqrt_dt * rng.gen_normal();
            path.push(level);
        }
        path
    }
}

/// Left-point (Itô) sum `Σ W_i (W_{i+1} − W_i)`.
pub fn ito_integral(path: &[f64]) -> f64 {
    path.windows(2).map(|w| w[0] * (w[1] - w[0])).sum()
}

/// Midpoint (Stratonovich) sum `Σ ½(W_i + W_{i+1}) (W_{i+1} − W_i)`.
pub fn stratonovich_integral(path: &[f64]) -> f64 {
    path.windows(2)
        .map(|w| 0.5 * (w[0] + w[1]) * (w[1] - w[0]))
        .sum()
}

/// Realised quadratic variation `Σ (W_{i+1} − W_i)²`.
pub fn quadratic_variation(path: &[f64]) -> f64 {
    path.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum()
}
