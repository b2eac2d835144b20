//! Static pipe network case.

use std::collections::BTreeMap;
use std::path::Path;

use pf_network::{
    FixedFlows, FlowAssignment, NetworkLayout, NetworkReport, PipeNetwork, UniformRandomFlows,
    ZeroFlows, load_json, load_yaml,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::NetworkCaseConfig;
use crate::error::{AppError, AppResult};

/// Where segment flows come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FlowSource {
    /// Uniform placeholder flows on `[low, high)` cfs.
    Random { low: f64, high: f64 },
    /// Explicit flows per segment; unlisted segments carry none.
    Fixed { flows: BTreeMap<String, f64> },
    Zero,
}

impl Default for FlowSource {
    fn default() -> Self {
        FlowSource::Random {
            low: UniformRandomFlows::DEFAULT_LOW,
            high: UniformRandomFlows::DEFAULT_HIGH,
        }
    }
}

impl FlowSource {
    fn strategy(&self, seed: Option<u64>) -> AppResult<Box<dyn FlowAssignment>> {
        let strategy: Box<dyn FlowAssignment> = match self {
            FlowSource::Random { low, high } => {
                Box::new(UniformRandomFlows::new(*low, *high, seed)?)
            }
            FlowSource::Fixed { flows } => Box::new(
                flows
                    .iter()
                    .map(|(name, q)| (name.clone(), *q))
                    .collect::<FixedFlows>(),
            ),
            FlowSource::Zero => Box::new(ZeroFlows),
        };
        Ok(strategy)
    }
}

/// Load a layout, choosing the format from the file extension.
pub fn load_layout(path: &Path) -> AppResult<NetworkLayout> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let layout = match ext.as_deref() {
        Some("yaml") | Some("yml") => load_yaml(path)?,
        Some("json") => load_json(path)?,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "layout file must be .yaml, .yml or .json: {}",
                path.display()
            )));
        }
    };
    Ok(layout)
}

pub fn run_network_case(config: &NetworkCaseConfig) -> AppResult<NetworkReport> {
    config
        .friction
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    let layout = match &config.layout {
        Some(path) => load_layout(path)?,
        None => NetworkLayout::default(),
    };

    let mut network = PipeNetwork::from_layout(&layout)?;
    let mut strategy = config.flows.strategy(config.seed)?;
    network.assign_flows(strategy.as_mut())?;
    let report = network.report(&config.friction)?;

    info!(
        network = network.name(),
        seed = ?config.seed,
        imbalance = report.total_imbalance(),
        "Network case finished"
    );
    Ok(report)
}
