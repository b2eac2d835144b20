//! Incremental graph builder.

use pf_core::{LinkId, NodeId};

use crate::error::GraphError;
use crate::graph::{End, Graph, Incidence, Link, Node};
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_node` and `add_link` to build up the graph,
/// then call `build()` to validate and freeze it into an immutable `Graph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a link from `start` to `end` and return its ID.
    ///
    /// Endpoints are checked in `build()`, not here.
    pub fn add_link(&mut self, name: impl Into<String>, start: NodeId, end: NodeId) -> LinkId {
        let id = LinkId::from_index(self.links.len() as u32);
        self.links.push(Link {
            id,
            name: name.into(),
            start,
            end,
        });
        id
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<Graph, GraphError> {
        validate::validate_structure(&self.nodes, &self.links)?;

        let (offsets, incidences) = Self::build_incidence(&self.nodes, &self.links);

        validate::validate_incidence(&self.nodes, &self.links, &offsets, &incidences)?;

        Ok(Graph {
            nodes: self.nodes,
            links: self.links,
            offsets,
            incidences,
        })
    }

    /// For each node, collect the links touching it (in link order).
    fn build_incidence(nodes: &[Node], links: &[Link]) -> (Vec<usize>, Vec<Incidence>) {
        let mut per_node: Vec<Vec<Incidence>> = vec![Vec::new(); nodes.len()];
        for link in links {
            per_node[link.start.slot()].push(Incidence {
                link: link.id,
                end: End::Start,
            });
            per_node[link.end.slot()].push(Incidence {
                link: link.id,
                end: End::End,
            });
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(links.len() * 2);
        offsets.push(0);
        for list in per_node {
            flat.extend(list);
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = GraphBuilder::new();
        let n1 = builder.add_node("a");
        let n2 = builder.add_node("b");
        let l1 = builder.add_link("a-b", n1, n2);

        assert_eq!(n1.index(), 0);
        assert_eq!(n2.index(), 1);
        assert_eq!(l1.index(), 0);
        assert_eq!(builder.nodes.len(), 2);
        assert_eq!(builder.links.len(), 1);
    }

    #[test]
    fn builder_build_simple() {
        let mut builder = GraphBuilder::new();
        let n1 = builder.add_node("a");
        let n2 = builder.add_node("b");
        let l = builder.add_link("a-b", n1, n2);

        let graph = builder.build().unwrap();
        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.links().len(), 1);

        assert_eq!(
            graph.incident(n1),
            &[Incidence {
                link: l,
                end: End::Start
            }]
        );
        assert_eq!(
            graph.incident(n2),
            &[Incidence {
                link: l,
                end: End::End
            }]
        );
    }

    #[test]
    fn dangling_endpoint_rejected() {
        let mut builder = GraphBuilder::new();
        let n1 = builder.add_node("a");
        builder.add_link("a-?", n1, NodeId::from_index(7));
        assert!(matches!(
            builder.build(),
            Err(GraphError::InvalidNodeRef { .. })
        ));
    }
}
