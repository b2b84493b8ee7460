//! Error types for graph construction.

use thiserror::Error;

/// Errors from building or querying a graph.
///
/// Construction errors never partially mutate the graph: a rejected
/// insertion leaves node count and adjacency unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node with this name already exists.
    #[error("node '{name}' already exists")]
    DuplicateNode {
        /// The rejected name.
        name: String,
    },
    /// A referenced node name is absent from the graph.
    #[error("unknown node '{name}'")]
    UnknownNode {
        /// The missing name.
        name: String,
    },
    /// The operation needs at least one node.
    #[error("graph has no nodes")]
    EmptyGraph,
}
