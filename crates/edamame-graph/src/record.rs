//! Input and output record shapes exchanged with loaders and renderers.

use edamame_core::{NodeId, Vec2};

/// Default render radius for nodes added by name only.
pub const DEFAULT_RADIUS: f32 = 1.0;

/// A node as supplied by an external loader.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    /// Unique node name.
    pub name: String,
    /// Render hint; carried through layout but never used in force math.
    pub radius: f32,
}

impl NodeRecord {
    /// Build a record with the given name and radius.
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            radius,
        }
    }
}

/// An undirected edge as supplied by an external loader.
///
/// Endpoint order is irrelevant; both names must already exist as nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeRecord {
    /// One endpoint.
    pub a: String,
    /// The other endpoint.
    pub b: String,
}

impl EdgeRecord {
    /// Build an edge record between two node names.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

/// Read-only view of one node, produced for renderers and exporters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeView<'g> {
    /// Dense index of the node.
    pub id: NodeId,
    /// Unique node name.
    pub name: &'g str,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Render radius.
    pub radius: f32,
}
