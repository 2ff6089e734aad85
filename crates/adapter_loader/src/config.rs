//! Study configuration loaded from TOML.
//!
//! Every section and field has a default, so a partial file (or an empty
//! one) yields the reference study `S0 = 1, K = 1, r = 0.05, σ = 0.30,
//! T = 1.4`:
//! ```toml
//! [market]
//! spot = 1.0
//! rate = 0.05
//! volatility = 0.30
//!
//! [option]
//! strike = 1.0
//! expiry = 1.4
//! side = "call"
//! strikes = [0.8, 0.9, 1.0, 1.1, 1.2]
//!
//! [lattice]
//! steps = 10
//!
//! [implied_vol]
//! lower = 0.01
//! upper = 1.0
//! ```

use std::path::Path;

use pricer_models::analytical::{ImpliedVolConfig, ImpliedVolSolver};
use pricer_models::instruments::{MarketParameters, OptionSide, OptionSpec};
use pricer_models::lattice::{LatticeError, LatticeModel};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LoaderError;

/// `[market]` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSection {
    /// Spot price `S0`
    pub spot: f64,
    /// Continuously compounded rate
    pub rate: f64,
    /// Annualised volatility
    pub volatility: f64,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            spot: 1.0,
            rate: 0.05,
            volatility: 0.30,
        }
    }
}

/// `[option]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSection {
    /// Strike of the reference option
    pub strike: f64,
    /// Maturity in years
    pub expiry: f64,
    /// Call or put
    pub side: OptionSide,
    /// Strike ladder for report tables
    pub strikes: Vec<f64>,
}

impl Default for OptionSection {
    fn default() -> Self {
        Self {
            strike: 1.0,
            expiry: 1.4,
            side: OptionSide::Call,
            strikes: Vec::new(),
        }
    }
}

/// `[lattice]` section.
///
/// Without explicit moves the tree is the Cox-Ross-Rubinstein tree implied by
/// the market section. Explicit trees need all of `rate`, `down` and `up`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeSection {
    /// Number of steps `N`
    pub steps: usize,
    /// Per-step rate `r`
    pub rate: Option<f64>,
    /// Per-step relative down-move `d`
    pub down: Option<f64>,
    /// Per-step relative up-move `u`
    pub up: Option<f64>,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            steps: 10,
            rate: None,
            down: None,
            up: None,
        }
    }
}

/// Complete study configuration.
///
/// # Examples
/// ```
/// use adapter_loader::StudyConfig;
///
/// let config = StudyConfig::from_toml_str("[market]\nvolatility = 0.25\n").unwrap();
/// assert_eq!(config.market.volatility, 0.25);
/// assert_eq!(config.market.spot, 1.0);
/// assert_eq!(config.option.expiry, 1.4);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Market state
    pub market: MarketSection,
    /// Reference option and strike ladder
    pub option: OptionSection,
    /// Binomial tree settings
    pub lattice: LatticeSection,
    /// Implied volatility bracket
    pub implied_vol: ImpliedVolConfig,
}

impl StudyConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded study configuration");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, LoaderError> {
        Ok(toml::from_str(content)?)
    }

    /// Validated market parameters.
    pub fn market_parameters(&self) -> Result<MarketParameters, LoaderError> {
        Ok(MarketParameters::new(
            self.market.spot,
            self.market.rate,
            self.market.volatility,
        )?)
    }

    /// Validated reference option.
    pub fn option_spec(&self) -> Result<OptionSpec, LoaderError> {
        Ok(OptionSpec::new(
            self.option.strike,
            self.option.expiry,
            self.option.side,
        )?)
    }

    /// Strike ladder, falling back to the reference strike when empty.
    pub fn strikes(&self) -> Vec<f64> {
        if self.option.strikes.is_empty() {
            vec![self.option.strike]
        } else {
            self.option.strikes.clone()
        }
    }

    /// Binomial tree over the option's expiry.
    ///
    /// # Errors
    /// `LoaderError::Model` if the tree parameters are invalid or only some
    /// of the explicit moves are given.
    pub fn lattice(&self) -> Result<LatticeModel, LoaderError> {
        let section = &self.lattice;
        let tree = match (section.rate, section.down, section.up) {
            (Some(rate), Some(down), Some(up)) => LatticeModel::new(
                self.market.spot,
                rate,
                down,
                up,
                self.option.expiry,
                section.steps,
            )?,
            (None, None, None) => LatticeModel::cox_ross_rubinstein(
                self.market.spot,
                self.market.rate,
                self.market.volatility,
                self.option.expiry,
                section.steps,
            )?,
            _ => {
                return Err(LatticeError::InvalidLatticeParameters {
                    reason: "explicit trees need rate, down and up".to_string(),
                }
                .into());
            }
        };
        Ok(tree)
    }

    /// Implied volatility solver for the configured bracket.
    pub fn implied_vol_solver(&self) -> ImpliedVolSolver {
        ImpliedVolSolver::new(self.implied_vol)
    }
}
