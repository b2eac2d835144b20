//! pf-network: a static pipe network with nominal pipe data.
//!
//! Provides:
//! - `NetworkLayout`: serializable description of nodes, pipes and the loop check
//! - `PipeNetwork`: validated nodes and segments on top of a `pf_graph::Graph`
//! - Flow assignment strategies (random placeholder, fixed, zero)
//! - `NetworkReport` with per-segment flows, node balances, loop pressure
//!   differences, head losses and node pressures
//!
//! No network solve is performed: flows come from the assignment strategy and
//! node pressures are fixed inputs.

pub mod error;
pub mod flows;
pub mod layout;
pub mod network;
pub mod report;
pub mod validate;

pub use error::{NetworkError, NetworkResult};
pub use flows::{FixedFlows, FlowAssignment, UniformRandomFlows, ZeroFlows};
pub use layout::{LoopEdgeDef, NetworkLayout, NodeDef, PipeDef, load_json, load_yaml};
pub use network::{Node, PipeNetwork, PipeProperties, Segment};
pub use report::{LoopDrop, NetworkReport, NodeBalance, NodePressure, SegmentFlow, SegmentHeadLoss};
pub use validate::{LayoutError, validate_layout};
