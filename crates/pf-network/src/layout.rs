//! Network layout schema.

use std::path::Path;

use pf_core::constants::DEFAULT_NODE_PRESSURE_PSI;
use serde::{Deserialize, Serialize};

use crate::error::NetworkResult;
use crate::validate::validate_layout;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkLayout {
    pub name: String,
    /// Pressure given to nodes without an explicit one (psi)
    #[serde(default = "default_pressure")]
    pub default_pressure_psi: f64,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub pipes: Vec<PipeDef>,
    /// Node pairs whose pressure differences make up the loop check, labelled A, B, ...
    #[serde(default, rename = "loop")]
    pub loop_check: Vec<LoopEdgeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_psi: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub name: String,
    pub start: String,
    pub end: String,
    pub diameter_in: f64,
    pub length_in: f64,
    pub roughness_ft: f64,
}

/// Written as a `[from, to]` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct LoopEdgeDef {
    pub from: String,
    pub to: String,
}

impl From<(String, String)> for LoopEdgeDef {
    fn from((from, to): (String, String)) -> Self {
        Self { from, to }
    }
}

impl From<LoopEdgeDef> for (String, String) {
    fn from(edge: LoopEdgeDef) -> Self {
        (edge.from, edge.to)
    }
}

fn default_pressure() -> f64 {
    DEFAULT_NODE_PRESSURE_PSI
}

/// Pipe table of the ten-node demonstration network:
/// (name, start, end, diameter in, length in, roughness ft).
const BUILTIN_PIPES: [(&str, &str, &str, f64, f64, f64); 13] = [
    ("a-b", "a", "b", 18.0, 1000.0, 0.00085),
    ("a-h", "a", "h", 24.0, 1600.0, 0.00085),
    ("b-c", "b", "c", 18.0, 500.0, 0.00085),
    ("b-e", "b", "e", 16.0, 800.0, 0.00085),
    ("c-d", "c", "d", 18.0, 500.0, 0.00085),
    ("c-f", "c", "f", 16.0, 800.0, 0.00085),
    ("d-g", "d", "g", 16.0, 800.0, 0.00085),
    ("e-f", "e", "f", 12.0, 500.0, 0.00085),
    ("e-i", "e", "i", 18.0, 800.0, 0.003),
    ("f-g", "f", "g", 12.0, 500.0, 0.00085),
    ("g-j", "g", "j", 18.0, 800.0, 0.003),
    ("h-i", "h", "i", 24.0, 1000.0, 0.003),
    ("i-j", "i", "j", 24.0, 1000.0, 0.003),
];

/// Connections A..E of the a-b-e-i-h loop. The fifth closes h back to a;
/// the report prints the endpoints capitalised.
const BUILTIN_LOOP: [(&str, &str); 5] = [("a", "b"), ("b", "e"), ("e", "i"), ("i", "h"), ("h", "a")];

impl Default for NetworkLayout {
    /// Ten nodes `a`..`j` at 80 psi, thirteen pipes, loop a-b-e-i-h-a.
    fn default() -> Self {
        let nodes = "abcdefghij"
            .chars()
            .map(|c| NodeDef {
                name: c.to_string(),
                pressure_psi: None,
            })
            .collect();

        let pipes = BUILTIN_PIPES
            .iter()
            .map(|&(name, start, end, d, l, e)| PipeDef {
                name: name.to_string(),
                start: start.to_string(),
                end: end.to_string(),
                diameter_in: d,
                length_in: l,
                roughness_ft: e,
            })
            .collect();

        let loop_check = BUILTIN_LOOP
            .iter()
            .map(|&(from, to)| LoopEdgeDef {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect();

        Self {
            name: "ten-node demonstration network".to_string(),
            default_pressure_psi: DEFAULT_NODE_PRESSURE_PSI,
            nodes,
            pipes,
            loop_check,
        }
    }
}

impl NetworkLayout {
    pub fn from_yaml_str(content: &str) -> NetworkResult<Self> {
        let layout: NetworkLayout = serde_yaml::from_str(content)?;
        validate_layout(&layout)?;
        Ok(layout)
    }

    pub fn from_json_str(content: &str) -> NetworkResult<Self> {
        let layout: NetworkLayout = serde_json::from_str(content)?;
        validate_layout(&layout)?;
        Ok(layout)
    }

    pub fn to_yaml_string(&self) -> NetworkResult<String> {
        validate_layout(self)?;
        Ok(serde_yaml::to_string(self)?)
    }
}

pub fn load_yaml(path: &Path) -> NetworkResult<NetworkLayout> {
    let content = std::fs::read_to_string(path)?;
    NetworkLayout::from_yaml_str(&content)
}

pub fn load_json(path: &Path) -> NetworkResult<NetworkLayout> {
    let content = std::fs::read_to_string(path)?;
    NetworkLayout::from_json_str(&content)
}
