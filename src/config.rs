//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config <path>` on the command line
//! 2. `$ECON_CONFIG` (the binary reads a `.env` file in the working directory first)
//! 3. `./econ.toml`
//! 4. Built-in defaults (every key is optional)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::economy::{GoodsMarket, MoneyMarket};
use crate::error::AppError;
use crate::sim::{ShotModel, SimConfig};

const DEFAULT_FILE: &str = "econ.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logistic: LogisticConfig,
    pub simulation: SimulationConfig,
    pub goods: GoodsConfig,
    pub money: MoneyConfig,
}

/// Defaults for the logistic-map commands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogisticConfig {
    pub x0: f64,
    pub r: f64,
    /// Sequence length for `logistic`.
    pub n: usize,
    /// Sequence length for `stable` and `bifurcation`.
    pub stable_n: usize,
}

/// Monte Carlo scoring simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub trials: usize,
    pub intervals: usize,
    pub p_three: f64,
    pub p_two: f64,
    pub seed: u64,
}

/// Fixed parameters of the Keynesian cross.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoodsConfig {
    pub c0: f64,
    pub c1: f64,
    /// Axis extent of the diagram.
    pub y_max: f64,
}

/// Fixed parameters of the money market.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoneyConfig {
    pub k: f64,
    pub h: f64,
    pub m_max: f64,
    pub i_max: f64,
}

// --- Defaults ---

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            x0: 0.25,
            r: 3.2,
            n: crate::dynamics::DEFAULT_SEQUENCE_LEN,
            stable_n: crate::dynamics::DEFAULT_STABLE_LEN,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let sim = SimConfig::default();
        Self {
            trials: sim.trials,
            intervals: sim.model.intervals,
            p_three: sim.model.p_three,
            p_two: sim.model.p_two,
            seed: sim.seed,
        }
    }
}

impl Default for GoodsConfig {
    fn default() -> Self {
        let m = GoodsMarket::default();
        Self {
            c0: m.c0,
            c1: m.c1,
            y_max: crate::economy::goods::DEFAULT_Y_MAX,
        }
    }
}

impl Default for MoneyConfig {
    fn default() -> Self {
        let m = MoneyMarket::default();
        Self {
            k: m.k,
            h: m.h,
            m_max: crate::economy::money::DEFAULT_M_MAX,
            i_max: crate::economy::money::DEFAULT_I_MAX,
        }
    }
}

impl SimulationConfig {
    pub fn to_sim(&self) -> SimConfig {
        SimConfig {
            model: ShotModel {
                intervals: self.intervals,
                p_three: self.p_three,
                p_two: self.p_two,
            },
            trials: self.trials,
            seed: self.seed,
        }
    }
}

impl GoodsConfig {
    /// Baseline model with the configured fixed parameters and default sliders.
    pub fn market(&self) -> GoodsMarket {
        GoodsMarket {
            c0: self.c0,
            c1: self.c1,
            ..GoodsMarket::default()
        }
    }
}

impl MoneyConfig {
    pub fn market(&self) -> MoneyMarket {
        MoneyMarket {
            k: self.k,
            h: self.h,
            ..MoneyMarket::default()
        }
    }
}

impl Config {
    /// Resolve and load the configuration.
    ///
    /// Logs the chosen source, so install the subscriber before calling this.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        match resolve_path(explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => {
                tracing::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(2, format!("Failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&text)
            .map_err(|e| AppError::new(2, format!("Invalid config '{}': {e}", path.display())))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Ok(p) = std::env::var("ECON_CONFIG") {
        if !p.trim().is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    let local = PathBuf::from(DEFAULT_FILE);
    local.is_file().then_some(local)
}
