//! Case configuration loaded from YAML.

use std::path::Path;

use pf_hydraulics::FrictionModel;
use pf_ode::{IvpOptions, QuadOptions};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::network::FlowSource;
use crate::rlc::RlcCircuit;

/// Settings for all three cases. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ivp: IvpCaseConfig,
    pub rlc: RlcCaseConfig,
    pub network: NetworkCaseConfig,
}

/// y' = (y - 0.01x²)² sin(x²) + 0.02x on `[x_start, x_end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvpCaseConfig {
    pub x_start: f64,
    pub x_end: f64,
    pub y0: f64,
    /// Samples are `arange(x_start, sample_stop, sample_step)` clipped to `x_end`
    pub sample_stop: f64,
    pub sample_step: f64,
    pub solver: IvpOptions,
    pub quadrature: QuadOptions,
}

impl Default for IvpCaseConfig {
    fn default() -> Self {
        Self {
            x_start: 0.0,
            x_end: 5.0,
            y0: 0.4,
            sample_stop: 5.1,
            sample_step: 0.2,
            solver: IvpOptions::default(),
            quadrature: QuadOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlcCaseConfig {
    pub circuit: RlcCircuit,
    pub t_end: f64,
    pub points: usize,
    /// Loop current at t = 0 (A)
    pub i1_0: f64,
    /// Capacitor voltage at t = 0 (V)
    pub vc_0: f64,
    pub solver: IvpOptions,
}

impl Default for RlcCaseConfig {
    fn default() -> Self {
        Self {
            circuit: RlcCircuit::default(),
            t_end: 10.0,
            points: 1000,
            i1_0: 0.0,
            vc_0: 0.0,
            solver: IvpOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkCaseConfig {
    /// Layout file (YAML or JSON by extension); the built-in network when unset
    pub layout: Option<std::path::PathBuf>,
    /// Seed for the placeholder flows; OS entropy when unset
    pub seed: Option<u64>,
    pub flows: FlowSource,
    pub friction: FrictionModel,
}

/// Load `AppConfig` from a YAML file.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> AppResult<AppConfig> {
    serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))
}
