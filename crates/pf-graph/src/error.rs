//! Graph-specific error types.

use pf_core::{LinkId, NodeId};

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A link refers to a node that doesn't exist.
    InvalidNodeRef { link: LinkId, node: NodeId },

    /// A link starts and ends at the same node.
    SelfLoop { link: LinkId, node: NodeId },

    /// Two nodes or two links share a name.
    DuplicateName { kind: &'static str, name: String },

    /// An ID does not match its position in storage.
    IdMismatch { kind: &'static str, index: usize },

    /// Incidence lists disagree with link endpoints.
    InconsistentIncidence { link: LinkId, node: NodeId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidNodeRef { link, node } => {
                write!(f, "Link {} refers to non-existent node {}", link, node)
            }
            GraphError::SelfLoop { link, node } => {
                write!(f, "Link {} starts and ends at node {}", link, node)
            }
            GraphError::DuplicateName { kind, name } => {
                write!(f, "Duplicate {} name '{}'", kind, name)
            }
            GraphError::IdMismatch { kind, index } => {
                write!(f, "{} at position {} has a mismatched ID", kind, index)
            }
            GraphError::InconsistentIncidence { link, node } => {
                write!(
                    f,
                    "Link {} listed at node {} but doesn't touch that node",
                    link, node
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}
