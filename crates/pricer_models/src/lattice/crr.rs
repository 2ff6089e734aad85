//! Cox-Ross-Rubinstein binomial lattice.
//!
//! A step moves the asset by a relative factor `1 + d` (down) or `1 + u`
//! (up), so the level after `k` steps with `i` up-moves is
//! ```text
//! S(k, i) = S0 * (1 + d)^(k - i) * (1 + u)^i,   i = 0..=k
//! ```
//! The tree recombines: step `k` has `k + 1` nodes, ordered ascending in `i`.

use statrs::distribution::{Continuous, LogNormal};
use tracing::debug;

use super::error::LatticeError;
use crate::instruments::OptionSide;

/// Largest depth for which moves and paths are enumerated (2^20 sequences).
pub const MAX_ENUMERATION_STEPS: usize = 20;

fn check_depth(depth: usize) -> Result<(), LatticeError> {
    if depth > MAX_ENUMERATION_STEPS {
        return Err(LatticeError::EnumerationTooLarge {
            steps: depth,
            max: MAX_ENUMERATION_STEPS,
        });
    }
    Ok(())
}

/// Continuous-time parameters implied by a binomial tree.
///
/// `sigma` is the geometric mean `sqrt(σ_down · σ_up)`. It coincides with the
/// diffusion volatility only for symmetric trees `(1 + d)(1 + u) = 1`; for
/// asymmetric trees it is a heuristic with no error bound. It is `None` when
/// both moves lie on the same side of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffusionApproximation {
    /// Continuously compounded rate `ln(1 + r) · N / T`
    pub rate: f64,
    /// Down-move volatility `−ln(1 + d) · √(N / T)`
    pub sigma_down: f64,
    /// Up-move volatility `ln(1 + u) · √(N / T)`
    pub sigma_up: f64,
    /// Averaged volatility, if defined
    pub sigma: Option<f64>,
}

/// Recombining binomial tree over `[0, T]` with `N` uniform steps.
///
/// # Examples
/// ```
/// use pricer_models::lattice::LatticeModel;
///
/// let tree = LatticeModel::new(100.0, 0.0, -0.1, 0.1, 1.0, 2).unwrap();
///
/// let grid = tree.grid_points();
/// assert_eq!(grid[2].len(), 3);
/// assert!((grid[2][0] - 81.0).abs() < 1e-12);
/// assert!((grid[2][2] - 121.0).abs() < 1e-12);
///
/// let paths = tree.paths().unwrap();
/// assert_eq!(paths.len(), 4);
/// assert!(paths.iter().all(|path| path[0] == 100.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeModel {
    spot: f64,
    rate: f64,
    down: f64,
    up: f64,
    maturity: f64,
    steps: usize,
}

impl LatticeModel {
    /// Creates a validated lattice.
    ///
    /// # Arguments
    /// * `spot` - Initial level `S0` (must be positive)
    /// * `rate` - Per-step simple rate `r` (must exceed −1)
    /// * `down` - Per-step relative down-move `d` (must exceed −1)
    /// * `up` - Per-step relative up-move `u` (must exceed `d`)
    /// * `maturity` - Horizon `T` in years (must be positive)
    /// * `steps` - Number of steps `N` (at least 1)
    ///
    /// # Errors
    /// `LatticeError::InvalidLatticeParameters` naming the violated constraint.
    pub fn new(
        spot: f64,
        rate: f64,
        down: f64,
        up: f64,
        maturity: f64,
        steps: usize,
    ) -> Result<Self, LatticeError> {
        if steps == 0 {
            return Err(LatticeError::invalid("steps must be at least 1"));
        }
        let inputs = [
            ("spot", spot),
            ("rate", rate),
            ("down", down),
            ("up", up),
            ("maturity", maturity),
        ];
        for (name, value) in inputs {
            if !value.is_finite() {
                return Err(LatticeError::invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if spot <= 0.0 {
            return Err(LatticeError::invalid(format!(
                "spot must be positive, got {spot}"
            )));
        }
        if maturity <= 0.0 {
            return Err(LatticeError::invalid(format!(
                "maturity must be positive, got {maturity}"
            )));
        }
        if down <= -1.0 {
            return Err(LatticeError::invalid(format!(
                "down move must exceed -1, got {down}"
            )));
        }
        if 1.0 + up <= 1.0 + down {
            return Err(LatticeError::invalid(format!(
                "up factor 1 + {up} must exceed down factor 1 + {down}"
            )));
        }
        if rate <= -1.0 {
            return Err(LatticeError::invalid(format!(
                "per-step rate must exceed -1, got {rate}"
            )));
        }

        Ok(Self {
            spot,
            rate,
            down,
            up,
            maturity,
            steps,
        })
    }

    /// Builds the symmetric Cox-Ross-Rubinstein tree for a diffusion.
    ///
    /// With `Δt = T / N`: `u = e^(σ√Δt) − 1`, `d = e^(−σ√Δt) − 1`,
    /// `r = e^(rate·Δt) − 1`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::lattice::LatticeModel;
    ///
    /// let tree = LatticeModel::cox_ross_rubinstein(1.0, 0.05, 0.3, 1.4, 50).unwrap();
    /// let approx = tree.black_scholes_parameters();
    /// assert!((approx.rate - 0.05).abs() < 1e-12);
    /// assert!((approx.sigma.unwrap() - 0.3).abs() < 1e-12);
    /// ```
    pub fn cox_ross_rubinstein(
        spot: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
        steps: usize,
    ) -> Result<Self, LatticeError> {
        if steps == 0 {
            return Err(LatticeError::invalid("steps must be at least 1"));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(LatticeError::invalid(format!(
                "volatility must be positive, got {volatility}"
            )));
        }
        if !(maturity.is_finite() && maturity > 0.0) {
            return Err(LatticeError::invalid(format!(
                "maturity must be positive, got {maturity}"
            )));
        }

        let dt = maturity / steps as f64;
        let jump = volatility * dt.sqrt();
        Self::new(
            spot,
            (rate * dt).exp_m1(),
            (-jump).exp_m1(),
            jump.exp_m1(),
            maturity,
            steps,
        )
    }

    /// Returns the initial level `S0`.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the per-step rate `r`.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the relative down-move `d`.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Returns the relative up-move `u`.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Returns the horizon `T`.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the number of steps `N`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step length `T / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.steps as f64
    }

    #[inline]
    fn level(&self, step: usize, ups: usize) -> f64 {
        let downs = (step - ups) as i32;
        self.spot * (1.0 + self.down).powi(downs) * (1.0 + self.up).powi(ups as i32)
    }

    /// The `N + 1` uniform time points `k·T/N`.
    pub fn times(&self) -> Vec<f64> {
        let (maturity, n) = (self.maturity, self.steps as f64);
        (0..=self.steps).map(|k| maturity * k as f64 / n).collect()
    }

    /// Achievable levels per step: `grid[k][i] = S0·(1+d)^(k−i)·(1+u)^i`.
    ///
    /// Step `k` holds `k + 1` strictly ascending levels.
    pub fn grid_points(&self) -> Vec<Vec<f64>> {
        (0..=self.steps)
            .map(|step| (0..=step).map(|ups| self.level(step, ups)).collect())
            .collect()
    }

    /// Every length-`depth` move sequence over `{d, u}`.
    ///
    /// Sequence `j` takes the bits of `j` from most to least significant,
    /// `0 → d` and `1 → u`, so the first move varies slowest and the all-`d`
    /// sequence comes first.
    ///
    /// # Errors
    /// `LatticeError::EnumerationTooLarge` when `depth > MAX_ENUMERATION_STEPS`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::lattice::LatticeModel;
    ///
    /// let tree = LatticeModel::new(1.0, 0.0, -0.5, 1.0, 1.0, 3).unwrap();
    /// let moves = tree.moves(2).unwrap();
    /// assert_eq!(moves, vec![
    ///     vec![-0.5, -0.5],
    ///     vec![-0.5, 1.0],
    ///     vec![1.0, -0.5],
    ///     vec![1.0, 1.0],
    /// ]);
    /// ```
    pub fn moves(&self, depth: usize) -> Result<Vec<Vec<f64>>, LatticeError> {
        check_depth(depth)?;
        Ok((0..1usize << depth)
            .map(|index| {
                (0..depth)
                    .map(|position| self.move_at(index, depth, position))
                    .collect()
            })
            .collect())
    }

    #[inline]
    fn move_at(&self, index: usize, depth: usize, position: usize) -> f64 {
        if (index >> (depth - 1 - position)) & 1 == 1 {
            self.up
        } else {
            self.down
        }
    }

    /// Every root-to-leaf path, in the order of [`LatticeModel::moves`].
    ///
    /// Row `j` is `S0·∏(1 + move_k)` accumulated over the `j`-th move
    /// sequence; the shape is `2^N × (N + 1)` and the first column is `S0`.
    ///
    /// # Errors
    /// `LatticeError::EnumerationTooLarge` when `N > MAX_ENUMERATION_STEPS`.
    pub fn paths(&self) -> Result<Vec<Vec<f64>>, LatticeError> {
        check_depth(self.steps)?;
        let count = 1usize << self.steps;
        debug!(steps = self.steps, count, "enumerating lattice paths");
        Ok((0..count)
            .map(|index| {
                let mut path = Vec::with_capacity(self.steps + 1);
                let mut level = self.spot;
                path.push(level);
                for position in 0..self.steps {
                    level *= 1.0 + self.move_at(index, self.steps, position);
                    path.push(level);
                }
                path
            })
            .collect())
    }

    /// Terminal levels with the number of enumerated paths ending there.
    ///
    /// Counts are the binomial coefficients `C(N, i)` and sum to `2^N`.
    ///
    /// # Errors
    /// `LatticeError::EnumerationTooLarge` when `N > MAX_ENUMERATION_STEPS`.
    pub fn terminal_histogram(&self) -> Result<Vec<(f64, usize)>, LatticeError> {
        check_depth(self.steps)?;
        let mut counts = vec![0usize; self.steps + 1];
        for index in 0..(1usize << self.steps) {
            counts[index.count_ones() as usize] += 1;
        }
        Ok(counts
            .into_iter()
            .enumerate()
            .map(|(ups, count)| (self.level(self.steps, ups), count))
            .collect())
    }

    /// Continuous-time rate and volatility implied by the tree.
    pub fn black_scholes_parameters(&self) -> DiffusionApproximation {
        let steps_per_year = self.steps as f64 / self.maturity;
        let scale = steps_per_year.sqrt();
        let sigma_down = -self.down.ln_1p() * scale;
        let sigma_up = self.up.ln_1p() * scale;
        let product = sigma_down * sigma_up;

        DiffusionApproximation {
            rate: self.rate.ln_1p() * steps_per_year,
            sigma_down,
            sigma_up,
            sigma: (product >= 0.0).then(|| product.sqrt()),
        }
    }

    /// Log-normal density of `S_T` under [`LatticeModel::black_scholes_parameters`].
    ///
    /// Meant as an overlay for the terminal histogram, not as a pricing
    /// reference. Returns `None` when the averaged volatility is undefined or
    /// zero and `Some(0.0)` for non-positive levels.
    pub fn black_scholes_pdf(&self, level: f64) -> Option<f64> {
        let params = self.black_scholes_parameters();
        let sigma = params.sigma.filter(|sigma| *sigma > 0.0)?;
        if level <= 0.0 {
            return Some(0.0);
        }

        let location = self.spot.ln() + (params.rate - 0.5 * sigma * sigma) * self.maturity;
        let scale = sigma * self.maturity.sqrt();
        let density = LogNormal::new(location, scale).ok()?;
        Some(density.pdf(level))
    }

    /// Risk-neutral up probability `q = (r − d)/(u − d)`.
    ///
    /// # Errors
    /// `LatticeError::ArbitrageableRate` unless `d < r < u`.
    pub fn risk_neutral_probability(&self) -> Result<f64, LatticeError> {
        if !(self.down < self.rate && self.rate < self.up) {
            return Err(LatticeError::ArbitrageableRate {
                rate: self.rate,
                down: self.down,
                up: self.up,
            });
        }
        Ok((self.rate - self.down) / (self.up - self.down))
    }

    /// European option value by backward induction.
    ///
    /// Terminal payoffs on `grid_points()[N]` are rolled back with
    /// probability `q` and discount `1/(1 + r)` per step.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::OptionSide;
    /// use pricer_models::lattice::LatticeModel;
    ///
    /// // One step, zero rate, q = 1/2: call pays 10 or 0
    /// let tree = LatticeModel::new(100.0, 0.0, -0.1, 0.1, 1.0, 1).unwrap();
    /// let value = tree.price_european(100.0, OptionSide::Call).unwrap();
    /// assert!((value - 5.0).abs() < 1e-12);
    /// ```
    pub fn price_european(&self, strike: f64, side: OptionSide) -> Result<f64, LatticeError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(LatticeError::InvalidStrike { strike });
        }
        let q = self.risk_neutral_probability()?;
        let discount = 1.0 / (1.0 + self.rate);

        let mut values: Vec<f64> = (0..=self.steps)
            .map(|ups| side.intrinsic(self.level(self.steps, ups), strike))
            .collect();
        for step in (0..self.steps).rev() {
            for node in 0..=step {
                values[node] = discount * (q * values[node + 1] + (1.0 - q) * values[node]);
            }
        }

        debug!(strike, %side, steps = self.steps, value = values[0], "lattice european value");
        Ok(values[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_tree(steps: usize) -> LatticeModel {
        LatticeModel::new(100.0, 0.01, -0.05, 0.06, 1.0, steps).unwrap()
    }

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_rejects_invalid_parameters() {
        let cases = [
            (100.0, 0.01, -0.05, 0.06, 1.0, 0),
            (100.0, 0.01, -1.0, 0.06, 1.0, 5),
            (100.0, 0.01, -1.5, 0.06, 1.0, 5),
            (100.0, 0.01, 0.06, 0.06, 1.0, 5),
            (100.0, 0.01, 0.1, 0.05, 1.0, 5),
            (0.0, 0.01, -0.05, 0.06, 1.0, 5),
            (100.0, 0.01, -0.05, 0.06, 0.0, 5),
            (100.0, -1.0, -0.05, 0.06, 1.0, 5),
            (f64::NAN, 0.01, -0.05, 0.06, 1.0, 5),
            (100.0, 0.01, -0.05, f64::INFINITY, 1.0, 5),
        ];
        for (spot, rate, down, up, maturity, steps) in cases {
            let result = LatticeModel::new(spot, rate, down, up, maturity, steps);
            assert!(
                matches!(result, Err(LatticeError::InvalidLatticeParameters { .. })),
                "accepted S0={spot}, r={rate}, d={down}, u={up}, T={maturity}, N={steps}"
            );
        }
    }

    #[test]
    fn test_rejects_factors_equal_in_floating_point() {
        // u > d, but 1 + u == 1 + d, which would flatten the grid
        let result = LatticeModel::new(1.0, 0.0, 0.0, 1e-17, 1.0, 3);
        assert!(matches!(
            result,
            Err(LatticeError::InvalidLatticeParameters { .. })
        ));

        let tree = LatticeModel::new(1.0, 0.0, 0.0, 1e-15, 1.0, 3).unwrap();
        for levels in tree.grid_points() {
            assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_crr_rejects_invalid_inputs() {
        let crr = |s, sigma, t, n| LatticeModel::cox_ross_rubinstein(s, 0.05, sigma, t, n);
        assert!(crr(1.0, 0.0, 1.0, 10).is_err());
        assert!(crr(1.0, 0.3, 1.0, 0).is_err());
        assert!(crr(1.0, 0.3, -1.0, 10).is_err());
        assert!(crr(-1.0, 0.3, 1.0, 10).is_err());
    }

    #[test]
    fn test_crr_is_symmetric() {
        let tree = LatticeModel::cox_ross_rubinstein(1.0, 0.05, 0.3, 1.4, 20).unwrap();
        let product = (1.0 + tree.down()) * (1.0 + tree.up());
        assert_relative_eq!(product, 1.0, epsilon = 1e-14);
        assert_relative_eq!(tree.dt(), 0.07, epsilon = 1e-15);
    }

    // ========================================
    // Grid and enumeration
    // ========================================

    #[test]
    fn test_times_uniform() {
        let tree = LatticeModel::new(1.0, 0.0, -0.1, 0.1, 2.0, 4).unwrap();
        assert_eq!(tree.times(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_grid_points_closed_form_and_ascending() {
        let tree = sample_tree(12);
        let grid = tree.grid_points();
        assert_eq!(grid.len(), 13);
        assert_eq!(grid[0], vec![100.0]);

        for (k, levels) in grid.iter().enumerate() {
            assert_eq!(levels.len(), k + 1);
            for (i, level) in levels.iter().enumerate() {
                let expected = 100.0 * 0.95_f64.powi((k - i) as i32) * 1.06_f64.powi(i as i32);
                assert_relative_eq!(*level, expected, max_relative = 1e-14);
            }
            assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_moves_ordering() {
        let tree = sample_tree(3);
        let moves = tree.moves(3).unwrap();
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0], vec![-0.05, -0.05, -0.05]);
        assert_eq!(moves[1], vec![-0.05, -0.05, 0.06]);
        assert_eq!(moves[4], vec![0.06, -0.05, -0.05]);
        assert_eq!(moves[7], vec![0.06, 0.06, 0.06]);

        assert_eq!(tree.moves(0).unwrap(), vec![Vec::<f64>::new()]);
    }

    #[test]
    fn test_moves_guarded() {
        let tree = sample_tree(3);
        assert_eq!(
            tree.moves(MAX_ENUMERATION_STEPS + 1).unwrap_err(),
            LatticeError::EnumerationTooLarge {
                steps: MAX_ENUMERATION_STEPS + 1,
                max: MAX_ENUMERATION_STEPS,
            }
        );
    }

    #[test]
    fn test_paths_shape_and_terminal_levels() {
        let tree = sample_tree(6);
        let paths = tree.paths().unwrap();
        let terminal_levels = &tree.grid_points()[6];

        assert_eq!(paths.len(), 64);
        for path in &paths {
            assert_eq!(path.len(), 7);
            assert_eq!(path[0], 100.0);
            let last = path[6];
            let on_grid = terminal_levels
                .iter()
                .any(|level| (level - last).abs() <= 1e-12 * level);
            assert!(on_grid, "terminal value {last} is not a grid level");
        }
    }

    #[test]
    fn test_paths_follow_moves() {
        let tree = sample_tree(4);
        let moves = tree.moves(4).unwrap();
        let paths = tree.paths().unwrap();
        for (sequence, path) in moves.iter().zip(&paths) {
            for (k, step) in sequence.iter().enumerate() {
                assert_relative_eq!(path[k + 1], path[k] * (1.0 + step), max_relative = 1e-15);
            }
        }
    }

    #[test]
    fn test_paths_guarded() {
        let tree = sample_tree(MAX_ENUMERATION_STEPS + 1);
        assert!(matches!(
            tree.paths(),
            Err(LatticeError::EnumerationTooLarge { .. })
        ));
        assert!(matches!(
            tree.terminal_histogram(),
            Err(LatticeError::EnumerationTooLarge { .. })
        ));
    }

    #[test]
    fn test_enumeration_limit_fits_in_memory() {
        let bytes = (1usize << MAX_ENUMERATION_STEPS) * (MAX_ENUMERATION_STEPS + 1) * 8;
        assert!(bytes <= 256 << 20, "full path set needs {bytes} bytes");

        let tree = sample_tree(MAX_ENUMERATION_STEPS);
        let total: usize = tree
            .terminal_histogram()
            .unwrap()
            .iter()
            .map(|(_, count)| count)
            .sum();
        assert_eq!(total, 1 << MAX_ENUMERATION_STEPS);
    }

    #[test]
    fn test_terminal_histogram_binomial() {
        let tree = sample_tree(4);
        let histogram = tree.terminal_histogram().unwrap();
        let counts: Vec<usize> = histogram.iter().map(|(_, count)| *count).collect();
        assert_eq!(counts, vec![1, 4, 6, 4, 1]);
        for ((level, _), expected) in histogram.iter().zip(&tree.grid_points()[4]) {
            assert_eq!(level, expected);
        }
    }

    // ========================================
    // Continuous-time approximation
    // ========================================

    #[test]
    fn test_black_scholes_parameters_asymmetric() {
        let tree = LatticeModel::new(1.0, 0.01, -0.05, 0.06, 2.0, 8).unwrap();
        let approx = tree.black_scholes_parameters();
        assert_relative_eq!(approx.rate, 1.01_f64.ln() * 4.0, epsilon = 1e-14);
        assert_relative_eq!(approx.sigma_down, -(0.95_f64.ln()) * 2.0, epsilon = 1e-14);
        assert_relative_eq!(approx.sigma_up, 1.06_f64.ln() * 2.0, epsilon = 1e-14);
        assert_relative_eq!(
            approx.sigma.unwrap(),
            (approx.sigma_down * approx.sigma_up).sqrt(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_sigma_undefined_for_one_sided_moves() {
        let tree = LatticeModel::new(1.0, 0.0, 0.01, 0.02, 1.0, 4).unwrap();
        assert_eq!(tree.black_scholes_parameters().sigma, None);
        assert_eq!(tree.black_scholes_pdf(1.0), None);
    }

    #[test]
    fn test_pdf_zero_below_origin_and_normalised() {
        let tree = LatticeModel::cox_ross_rubinstein(1.0, 0.05, 0.3, 1.4, 50).unwrap();
        assert_eq!(tree.black_scholes_pdf(0.0), Some(0.0));
        assert_eq!(tree.black_scholes_pdf(-1.0), Some(0.0));

        let n = 20_000;
        let upper = 10.0;
        let h = upper / n as f64;
        let mass: f64 = (1..n)
            .map(|i| tree.black_scholes_pdf(i as f64 * h).unwrap())
            .sum::<f64>()
            * h;
        assert_relative_eq!(mass, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pdf_matches_lognormal_formula() {
        let tree = LatticeModel::cox_ross_rubinstein(1.0, 0.05, 0.3, 1.4, 50).unwrap();
        let (s, sigma, t) = (1.2_f64, 0.3_f64, 1.4_f64);
        let nu = sigma * t.sqrt();
        let z = (s.ln() - (0.05 - 0.5 * sigma * sigma) * t) / nu;
        let expected = (-0.5 * z * z).exp() / (s * nu * (2.0 * std::f64::consts::PI).sqrt());
        let pdf = tree.black_scholes_pdf(s).unwrap();
        assert_relative_eq!(pdf, expected, max_relative = 1e-10);
    }

    // ========================================
    // Valuation
    // ========================================

    #[test]
    fn test_risk_neutral_probability() {
        let tree = LatticeModel::new(100.0, 0.0, -0.1, 0.1, 1.0, 1).unwrap();
        let q = tree.risk_neutral_probability().unwrap();
        assert_relative_eq!(q, 0.5, epsilon = 1e-15);

        let tree = LatticeModel::new(100.0, 0.2, -0.1, 0.1, 1.0, 1).unwrap();
        assert!(matches!(
            tree.risk_neutral_probability(),
            Err(LatticeError::ArbitrageableRate { .. })
        ));
        assert!(tree.price_european(100.0, OptionSide::Call).is_err());
    }

    #[test]
    fn test_price_european_parity() {
        let tree = sample_tree(10);
        let call = tree.price_european(100.0, OptionSide::Call).unwrap();
        let put = tree.price_european(100.0, OptionSide::Put).unwrap();
        let forward_strike = 100.0 / 1.01_f64.powi(10);
        assert_relative_eq!(call - put, 100.0 - forward_strike, epsilon = 1e-10);
    }

    #[test]
    fn test_price_european_rejects_bad_strike() {
        let tree = sample_tree(3);
        assert_eq!(
            tree.price_european(0.0, OptionSide::Put).unwrap_err(),
            LatticeError::InvalidStrike { strike: 0.0 }
        );
    }
}
