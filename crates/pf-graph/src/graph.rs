//! Core graph data structures.

use pf_core::{LinkId, NodeId};

/// Which end of a link touches a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    /// The link's start node (positive flow leaves here).
    Start,
    /// The link's end node (positive flow arrives here).
    End,
}

impl End {
    /// +1 for the start end, -1 for the end end.
    pub fn sign(self) -> f64 {
        match self {
            End::Start => 1.0,
            End::End => -1.0,
        }
    }
}

/// A junction in the network. Holds only identity; physical data lives with
/// the owner of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

/// A directed connection between two distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub name: String,
    pub start: NodeId,
    pub end: NodeId,
}

impl Link {
    /// Node at the given end.
    pub fn node_at(&self, end: End) -> NodeId {
        match end {
            End::Start => self.start,
            End::End => self.end,
        }
    }
}

/// One link touching a node, and which end of the link it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incidence {
    pub link: LinkId,
    pub end: End,
}

/// The graph: a validated, immutable collection of nodes and links.
///
/// Incidence is stored compactly: node i's entries are
/// `incidences[offsets[i]..offsets[i + 1]]`, ordered by link ID.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Link>,
    pub(crate) offsets: Vec<usize>,
    pub(crate) incidences: Vec<Incidence>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Look a node up by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Look a link up by name.
    pub fn find_link(&self, name: &str) -> Option<LinkId> {
        self.links.iter().find(|l| l.name == name).map(|l| l.id)
    }

    /// Links incident to a node, in link insertion order.
    pub fn incident(&self, node_id: NodeId) -> &[Incidence] {
        let idx = node_id.slot();
        if idx >= self.nodes.len() {
            return &[];
        }
        &self.incidences[self.offsets[idx]..self.offsets[idx + 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::Id;

    #[test]
    fn end_signs() {
        assert_eq!(End::Start.sign(), 1.0);
        assert_eq!(End::End.sign(), -1.0);
        assert_ne!(End::Start, End::End);
    }

    #[test]
    fn link_node_at() {
        let link = Link {
            id: Id::from_index(0),
            name: "a-b".into(),
            start: Id::from_index(3),
            end: Id::from_index(4),
        };
        assert_eq!(link.node_at(End::Start).index(), 3);
        assert_eq!(link.node_at(End::End).index(), 4);
    }
}
