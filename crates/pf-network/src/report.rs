//! Network evaluation report.

use std::fmt;

use pf_hydraulics::{FlowRegime, FrictionModel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentFlow {
    pub name: String,
    pub flow_cfs: f64,
}

/// Net flow at a node: positive for each segment starting here, negative for
/// each segment ending here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeBalance {
    pub name: String,
    pub net_flow_cfs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopDrop {
    pub label: char,
    pub from: String,
    pub to: String,
    pub pressure_drop_psi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentHeadLoss {
    pub name: String,
    pub length_in: f64,
    pub diameter_in: f64,
    pub reynolds: f64,
    pub regime: FlowRegime,
    pub friction_factor: Option<f64>,
    /// Inches of water, signed with the flow
    pub head_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePressure {
    pub name: String,
    pub pressure_psi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub network: String,
    pub friction: FrictionModel,
    pub flows: Vec<SegmentFlow>,
    pub node_balances: Vec<NodeBalance>,
    pub loop_drops: Vec<LoopDrop>,
    pub head_losses: Vec<SegmentHeadLoss>,
    pub pressures: Vec<NodePressure>,
}

impl NetworkReport {
    /// Sum of all node balances; zero up to rounding for any flow assignment.
    pub fn total_imbalance(&self) -> f64 {
        self.node_balances.iter().map(|b| b.net_flow_cfs).sum()
    }

    /// Largest |head loss| over all segments, with its segment name.
    pub fn max_head_loss(&self) -> Option<(&str, f64)> {
        self.head_losses
            .iter()
            .map(|h| (h.name.as_str(), h.head_loss.abs()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl fmt::Display for SegmentFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The flow in segment {} is {:.2} (cfs)", self.name, self.flow_cfs)
    }
}

impl fmt::Display for NodeBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net flow into node {} is {:.2} (cfs)", self.name, self.net_flow_cfs)
    }
}

impl fmt::Display for LoopDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Head loss for loop {} is {:.2} psi.", self.label, self.pressure_drop_psi)
    }
}

impl fmt::Display for SegmentHeadLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Head loss in pipe {} (Length={:.2} in, Diameter={:.2} in) is {:.2} in of water.",
            self.name, self.length_in, self.diameter_in, self.head_loss
        )
    }
}

impl fmt::Display for NodePressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pressure at node {} = {:.2} psi.", self.name, self.pressure_psi)
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flow in &self.flows {
            writeln!(f, "{flow}")?;
        }
        writeln!(f, "\nCheck node flows:")?;
        for balance in &self.node_balances {
            writeln!(f, "{balance}")?;
        }
        writeln!(f, "\nCheck loop head loss:")?;
        for drop in &self.loop_drops {
            writeln!(f, "{drop}")?;
        }
        writeln!(f, "\nCheck Head loss")?;
        for loss in &self.head_losses {
            writeln!(f, "{loss}")?;
        }
        writeln!(f, "\nCheck Pressure at every node")?;
        for pressure in &self.pressures {
            writeln!(f, "{pressure}")?;
        }
        Ok(())
    }
}
