//! Graph store for the edamame layout engine.
//!
//! A [`Graph`] owns a dense, insertion-ordered node sequence, a
//! name-to-index lookup, and a symmetric adjacency relation. Positions
//! and velocities are stored as parallel arrays so the layout stepper can
//! borrow them separately: positions shared, velocities partitioned.
//!
//! Topology is append-only. Nodes are never removed, so a [`NodeId`]
//! stays valid for the lifetime of the graph.
//!
//! [`NodeId`]: edamame_core::NodeId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod generate;
pub mod graph;
pub mod record;

pub use adjacency::Adjacency;
pub use generate::random_graph;
pub use graph::Graph;
pub use record::{EdgeRecord, NodeRecord, NodeView};
