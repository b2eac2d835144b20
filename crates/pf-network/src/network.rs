//! Pipe network: nodes with fixed pressures joined by pipe segments.

use pf_core::units::{Pressure, VolumeRate, cfs, ft, in_cfs, in_psi, inch, psi};
use pf_core::{LinkId, NodeId};
use pf_graph::{Graph, GraphBuilder, Incidence};
use pf_hydraulics::{FlowState, FrictionModel, Pipe};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{NetworkError, NetworkResult};
use crate::flows::FlowAssignment;
use crate::layout::NetworkLayout;
use crate::report::{
    LoopDrop, NetworkReport, NodeBalance, NodePressure, SegmentFlow, SegmentHeadLoss,
};
use crate::validate::validate_layout;

/// A junction with a fixed pressure.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    name: String,
    pub pressure: Pressure,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pressure_psi(&self) -> f64 {
        in_psi(self.pressure)
    }
}

/// A pipe placed between two nodes, carrying an assigned flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    id: LinkId,
    pipe: Pipe,
    start: NodeId,
    end: NodeId,
    /// Positive from start to end
    pub flow_rate: VolumeRate,
}

impl Segment {
    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.pipe.name()
    }

    pub fn pipe(&self) -> &Pipe {
        &self.pipe
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn flow_cfs(&self) -> f64 {
        in_cfs(self.flow_rate)
    }
}

/// Nominal pipe data in the units the layout is written in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeProperties {
    pub diameter_in: f64,
    pub length_in: f64,
    pub roughness_ft: f64,
}

#[derive(Debug, Clone)]
pub struct PipeNetwork {
    name: String,
    graph: Graph,
    nodes: Vec<Node>,
    segments: Vec<Segment>,
    loop_check: Vec<(NodeId, NodeId)>,
}

impl PipeNetwork {
    /// The built-in ten-node network with zero flows.
    pub fn new() -> NetworkResult<Self> {
        Self::from_layout(&NetworkLayout::default())
    }

    pub fn from_layout(layout: &NetworkLayout) -> NetworkResult<Self> {
        validate_layout(layout)?;

        let mut builder = GraphBuilder::new();
        let mut nodes = Vec::with_capacity(layout.nodes.len());
        for def in &layout.nodes {
            let id = builder.add_node(def.name.clone());
            let p = def.pressure_psi.unwrap_or(layout.default_pressure_psi);
            nodes.push(Node {
                id,
                name: def.name.clone(),
                pressure: psi(p),
            });
        }

        let lookup = |name: &str| -> NetworkResult<NodeId> {
            nodes
                .iter()
                .find(|n| n.name == name)
                .map(|n| n.id)
                .ok_or_else(|| NetworkError::UnknownNode(name.to_string()))
        };

        let mut segments = Vec::with_capacity(layout.pipes.len());
        for def in &layout.pipes {
            let start = lookup(&def.start)?;
            let end = lookup(&def.end)?;
            let pipe = Pipe::new(
                def.name.clone(),
                inch(def.diameter_in),
                inch(def.length_in),
                ft(def.roughness_ft),
            )
            .map_err(|source| NetworkError::Hydraulics {
                pipe: def.name.clone(),
                source,
            })?;
            let id = builder.add_link(def.name.clone(), start, end);
            segments.push(Segment {
                id,
                pipe,
                start,
                end,
                flow_rate: cfs(0.0),
            });
        }

        let graph = builder.build()?;

        let resolve = |name: &str| {
            graph
                .find_node(name)
                .ok_or_else(|| NetworkError::UnknownNode(name.to_string()))
        };
        let loop_check = layout
            .loop_check
            .iter()
            .map(|edge| Ok((resolve(&edge.from)?, resolve(&edge.to)?)))
            .collect::<NetworkResult<Vec<_>>>()?;

        info!(
            network = %layout.name,
            nodes = nodes.len(),
            segments = segments.len(),
            loop_connections = loop_check.len(),
            "Built pipe network"
        );

        Ok(Self {
            name: layout.name.clone(),
            graph,
            nodes,
            segments,
            loop_check,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn node_id(&self, name: &str) -> NetworkResult<NodeId> {
        self.graph
            .find_node(name)
            .ok_or_else(|| NetworkError::UnknownNode(name.to_string()))
    }

    fn segment_id(&self, name: &str) -> NetworkResult<LinkId> {
        self.graph
            .find_link(name)
            .ok_or_else(|| NetworkError::UnknownPipe(name.to_string()))
    }

    pub fn node(&self, name: &str) -> NetworkResult<&Node> {
        let id = self.node_id(name)?;
        Ok(&self.nodes[id.slot()])
    }

    pub fn segment(&self, name: &str) -> NetworkResult<&Segment> {
        let id = self.segment_id(name)?;
        Ok(&self.segments[id.slot()])
    }

    fn segment_mut(&mut self, name: &str) -> NetworkResult<&mut Segment> {
        let id = self.segment_id(name)?;
        Ok(&mut self.segments[id.slot()])
    }

    /// Segments touching a node, in segment order.
    pub fn connected_segments(&self, node: &str) -> NetworkResult<Vec<&Segment>> {
        let id = self.node_id(node)?;
        Ok(self
            .graph
            .incident(id)
            .iter()
            .map(|inc| &self.segments[inc.link.slot()])
            .collect())
    }

    pub fn pipe_properties(&self, name: &str) -> NetworkResult<PipeProperties> {
        let pipe = self.segment(name)?.pipe();
        Ok(PipeProperties {
            diameter_in: pipe.diameter_in(),
            length_in: pipe.length_in(),
            roughness_ft: pipe.roughness_ft(),
        })
    }

    pub fn set_flow(&mut self, name: &str, flow_cfs: f64) -> NetworkResult<()> {
        if !flow_cfs.is_finite() {
            return Err(NetworkError::InvalidValue {
                what: format!("flow in segment {name}"),
                value: flow_cfs,
            });
        }
        self.segment_mut(name)?.flow_rate = cfs(flow_cfs);
        Ok(())
    }

    pub fn set_node_pressure(&mut self, name: &str, pressure_psi: f64) -> NetworkResult<()> {
        if !pressure_psi.is_finite() {
            return Err(NetworkError::InvalidValue {
                what: format!("pressure at node {name}"),
                value: pressure_psi,
            });
        }
        let id = self.node_id(name)?;
        self.nodes[id.slot()].pressure = psi(pressure_psi);
        Ok(())
    }

    /// Overwrite every segment flow with values from `strategy`.
    pub fn assign_flows(&mut self, strategy: &mut dyn FlowAssignment) -> NetworkResult<()> {
        let names: Vec<&str> = self.segments.iter().map(Segment::name).collect();
        let flows = strategy.assign(&names)?;
        if flows.len() != self.segments.len() {
            return Err(NetworkError::InvalidValue {
                what: format!("flow count (expected {})", self.segments.len()),
                value: flows.len() as f64,
            });
        }
        for (segment, q) in self.segments.iter_mut().zip(flows) {
            if !q.is_finite() {
                return Err(NetworkError::InvalidValue {
                    what: format!("flow in segment {}", segment.name()),
                    value: q,
                });
            }
            segment.flow_rate = cfs(q);
        }
        debug!(segments = self.segments.len(), "Assigned segment flows");
        Ok(())
    }

    pub fn flow_rates(&self) -> Vec<SegmentFlow> {
        self.segments
            .iter()
            .map(|s| SegmentFlow {
                name: s.name().to_string(),
                flow_cfs: s.flow_cfs(),
            })
            .collect()
    }

    pub fn node_net_flows(&self) -> Vec<NodeBalance> {
        self.nodes
            .iter()
            .map(|node| {
                let net_flow_cfs = self
                    .graph
                    .incident(node.id)
                    .iter()
                    .map(|&Incidence { link, end }| end.sign() * self.segments[link.slot()].flow_cfs())
                    .sum();
                NodeBalance {
                    name: node.name.clone(),
                    net_flow_cfs,
                }
            })
            .collect()
    }

    /// Pressure difference across each loop connection, labelled `A`, `B`, ...
    pub fn loop_pressure_drops(&self) -> Vec<LoopDrop> {
        self.loop_check
            .iter()
            .zip('A'..)
            .map(|(&(from, to), label)| {
                let from = &self.nodes[from.slot()];
                let to = &self.nodes[to.slot()];
                LoopDrop {
                    label,
                    from: from.name.clone(),
                    to: to.name.clone(),
                    pressure_drop_psi: from.pressure_psi() - to.pressure_psi(),
                }
            })
            .collect()
    }

    pub fn flow_states(&self, friction: &FrictionModel) -> NetworkResult<Vec<FlowState>> {
        self.segments
            .iter()
            .map(|s| {
                s.pipe
                    .flow_state(s.flow_cfs(), friction)
                    .map_err(|source| NetworkError::Hydraulics {
                        pipe: s.name().to_string(),
                        source,
                    })
            })
            .collect()
    }

    pub fn pipe_head_losses(&self, friction: &FrictionModel) -> NetworkResult<Vec<SegmentHeadLoss>> {
        let states = self.flow_states(friction)?;
        Ok(self
            .segments
            .iter()
            .zip(states)
            .map(|(s, state)| SegmentHeadLoss {
                name: s.name().to_string(),
                length_in: s.pipe.length_in(),
                diameter_in: s.pipe.diameter_in(),
                reynolds: state.reynolds,
                regime: state.regime,
                friction_factor: state.friction_factor,
                head_loss: state.head_loss,
            })
            .collect())
    }

    pub fn node_pressures(&self) -> Vec<NodePressure> {
        self.nodes
            .iter()
            .map(|n| NodePressure {
                name: n.name.clone(),
                pressure_psi: n.pressure_psi(),
            })
            .collect()
    }

    pub fn report(&self, friction: &FrictionModel) -> NetworkResult<NetworkReport> {
        let report = NetworkReport {
            network: self.name.clone(),
            friction: *friction,
            flows: self.flow_rates(),
            node_balances: self.node_net_flows(),
            loop_drops: self.loop_pressure_drops(),
            head_losses: self.pipe_head_losses(friction)?,
            pressures: self.node_pressures(),
        };
        debug!(
            imbalance = report.total_imbalance(),
            "Evaluated network report"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::{FixedFlows, UniformRandomFlows, ZeroFlows};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn builtin_network_layout() {
        let net = PipeNetwork::new().unwrap();
        assert_eq!(net.nodes().len(), 10);
        assert_eq!(net.segments().len(), 13);
        assert!(net.segments().iter().all(|s| s.flow_cfs() == 0.0));
        assert!(net.nodes().iter().all(|n| (n.pressure_psi() - 80.0).abs() < 1e-9));
    }

    #[test]
    fn pipe_properties_lookup() {
        let net = PipeNetwork::new().unwrap();
        let props = net.pipe_properties("e-i").unwrap();
        assert!((props.diameter_in - 18.0).abs() < 1e-9);
        assert!((props.length_in - 800.0).abs() < 1e-9);
        assert!((props.roughness_ft - 0.003).abs() < 1e-12);
        assert!(matches!(
            net.pipe_properties("a-z"),
            Err(NetworkError::UnknownPipe(_))
        ));
    }

    #[test]
    fn connected_segments_in_insertion_order() {
        let net = PipeNetwork::new().unwrap();
        let names: Vec<&str> = net
            .connected_segments("e")
            .unwrap()
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["b-e", "e-f", "e-i"]);
    }

    #[test]
    fn net_flow_sign_convention() {
        let mut net = PipeNetwork::new().unwrap();
        let mut flows = FixedFlows::new().with("a-b", 2.0).with("b-c", 0.5);
        net.assign_flows(&mut flows).unwrap();

        let balances = net.node_net_flows();
        let get = |n: &str| balances.iter().find(|b| b.name == n).unwrap().net_flow_cfs;
        assert!(close(get("a"), 2.0));
        assert!(close(get("b"), -1.5));
        assert!(close(get("c"), -0.5));
        assert_eq!(get("j"), 0.0);
    }

    #[test]
    fn loop_drops_follow_pressures() {
        let mut net = PipeNetwork::new().unwrap();
        assert!(net.loop_pressure_drops().iter().all(|d| d.pressure_drop_psi == 0.0));

        net.set_node_pressure("e", 75.0).unwrap();
        let drops = net.loop_pressure_drops();
        let labels: String = drops.iter().map(|d| d.label).collect();
        assert_eq!(labels, "ABCDE");
        assert!(close(drops[1].pressure_drop_psi, 5.0));
        assert!(close(drops[2].pressure_drop_psi, -5.0));
        assert_eq!(drops[0].pressure_drop_psi, 0.0);
    }

    #[test]
    fn zero_flow_report_has_no_head_loss() {
        let mut net = PipeNetwork::new().unwrap();
        net.assign_flows(&mut ZeroFlows).unwrap();
        let report = net.report(&FrictionModel::default()).unwrap();
        assert!(report.head_losses.iter().all(|h| h.head_loss == 0.0));
        assert!(report.head_losses.iter().all(|h| h.friction_factor.is_none()));
    }

    #[test]
    fn seeded_report_is_reproducible() {
        let run = |seed| {
            let mut net = PipeNetwork::new().unwrap();
            net.assign_flows(&mut UniformRandomFlows::standard(Some(seed)).unwrap())
                .unwrap();
            net.report(&FrictionModel::default()).unwrap().to_string()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn set_flow_rejects_unknown_and_nan() {
        let mut net = PipeNetwork::new().unwrap();
        assert!(net.set_flow("a-b", 1.5).is_ok());
        assert!(close(net.segment("a-b").unwrap().flow_cfs(), 1.5));
        assert!(matches!(net.set_flow("z-z", 1.0), Err(NetworkError::UnknownPipe(_))));
        assert!(net.set_flow("a-b", f64::NAN).is_err());
        assert!(matches!(
            net.set_node_pressure("q", 1.0),
            Err(NetworkError::UnknownNode(_))
        ));
    }
}
