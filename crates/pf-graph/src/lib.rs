//! pf-graph: node/link topology for pipe networks.
//!
//! Provides:
//! - Core graph data structures (Node, Link, Incidence, Graph)
//! - Incremental graph builder with validation
//! - Per-node incidence lists with orientation
//!
//! # Example
//!
//! ```
//! use pf_graph::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! let a = builder.add_node("a");
//! let b = builder.add_node("b");
//! let ab = builder.add_link("a-b", a, b);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.links().len(), 1);
//! assert_eq!(graph.incident(a)[0].link, ab);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use graph::{End, Graph, Incidence, Link, Node};
