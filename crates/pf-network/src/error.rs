//! Error types for network construction and evaluation.

use pf_graph::GraphError;
use pf_hydraulics::HydraulicsError;

use crate::validate::LayoutError;

#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Pipe '{pipe}': {source}")]
    Hydraulics {
        pipe: String,
        source: HydraulicsError,
    },

    #[error("Unknown pipe: {0}")]
    UnknownPipe(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid value for {what}: {value}")]
    InvalidValue { what: String, value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
