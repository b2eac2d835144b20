//! Graph validation logic.

use std::collections::HashSet;

use crate::error::GraphError;
use crate::graph::{End, Incidence, Link, Node};

/// Validate the graph structure: IDs match storage, references exist,
/// no self-loops, names are unique.
pub(crate) fn validate_structure(nodes: &[Node], links: &[Link]) -> Result<(), GraphError> {
    for (i, node) in nodes.iter().enumerate() {
        if node.id.slot() != i {
            return Err(GraphError::IdMismatch {
                kind: "node",
                index: i,
            });
        }
    }
    for (i, link) in links.iter().enumerate() {
        if link.id.slot() != i {
            return Err(GraphError::IdMismatch {
                kind: "link",
                index: i,
            });
        }
    }

    for link in links {
        for node in [link.start, link.end] {
            if node.slot() >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    link: link.id,
                    node,
                });
            }
        }
        if link.start == link.end {
            return Err(GraphError::SelfLoop {
                link: link.id,
                node: link.start,
            });
        }
    }

    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            return Err(GraphError::DuplicateName {
                kind: "node",
                name: node.name.clone(),
            });
        }
    }
    seen.clear();
    for link in links {
        if !seen.insert(link.name.as_str()) {
            return Err(GraphError::DuplicateName {
                kind: "link",
                name: link.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validate incidence lists: each entry touches its node and every link
/// appears exactly twice (once per end).
pub(crate) fn validate_incidence(
    nodes: &[Node],
    links: &[Link],
    offsets: &[usize],
    incidences: &[Incidence],
) -> Result<(), GraphError> {
    if offsets.len() != nodes.len() + 1 || incidences.len() != links.len() * 2 {
        return Err(GraphError::IdMismatch {
            kind: "incidence table",
            index: offsets.len(),
        });
    }

    let mut seen: HashSet<(usize, bool)> = HashSet::new();
    for node in nodes {
        let i = node.id.slot();
        for inc in &incidences[offsets[i]..offsets[i + 1]] {
            let link = &links[inc.link.slot()];
            if link.node_at(inc.end) != node.id {
                return Err(GraphError::InconsistentIncidence {
                    link: link.id,
                    node: node.id,
                });
            }
            if !seen.insert((inc.link.slot(), inc.end == End::Start)) {
                return Err(GraphError::InconsistentIncidence {
                    link: link.id,
                    node: node.id,
                });
            }
        }
    }

    Ok(())
}
