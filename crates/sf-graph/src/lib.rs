//! sf-graph: workflow graph model for stepflow.
//!
//! Provides:
//! - Core graph data structures (Node, Edge, FlowGraph)
//! - Chain-shaped graph invariants: every step has at most one incoming and
//!   one outgoing transition, begin/end steps stay terminal, no cycles
//! - Validated connect/disconnect/remove/move operations
//!
//! # Example
//!
//! ```
//! use sf_graph::{FlowGraph, StepData, StepKind};
//!
//! let mut graph = FlowGraph::new();
//! let a = graph.add_node(StepKind::Normal, StepData::named("Review"));
//! let b = graph.add_node(StepKind::Normal, StepData::named("Approve"));
//! let edge = graph.connect(a, b).unwrap();
//!
//! assert!(edge.is_some());
//! assert_eq!(graph.node(a).unwrap().outgoing, edge);
//! ```

pub mod connect;
pub mod error;
pub mod graph;

// Re-exports for ergonomics
pub use error::{ConnectError, GraphError};
pub use sf_core::{EdgeId, NodeId};
pub use graph::{Edge, EdgeFrame, FlowGraph, LineStyle, Node, StepData, StepKind};
