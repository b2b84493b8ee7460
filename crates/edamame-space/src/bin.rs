//! Bin keys and per-bin aggregates.

use std::collections::HashMap;
use std::fmt;

use edamame_core::{NodeId, Vec2};
use smallvec::SmallVec;

/// Integer grid cell `(floor(x / bin_size), floor(y / bin_size))`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinKey {
    /// Column index.
    pub x: i64,
    /// Row index.
    pub y: i64,
}

impl BinKey {
    /// Construct a key from its grid indices.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The bin's grid origin (its lower-left corner) in layout space.
    ///
    /// Remote bins are treated as point masses at this corner.
    pub fn origin(self, bin_size: f64) -> Vec2 {
        Vec2::new(self.x as f64 * bin_size, self.y as f64 * bin_size)
    }
}

impl fmt::Display for BinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The bin containing `position`.
///
/// Uses `floor`, so `-0.5` with a bin size of 1 lands in bin `-1`.
/// Non-finite coordinates saturate to the extreme bins (NaN maps to 0).
#[inline]
pub fn bin_of(position: Vec2, bin_size: f64) -> BinKey {
    BinKey {
        x: (position.x / bin_size).floor() as i64,
        y: (position.y / bin_size).floor() as i64,
    }
}

/// One occupied grid cell.
#[derive(Clone, Debug, Default)]
pub struct Bin {
    members: SmallVec<[NodeId; 8]>,
    connections: HashMap<NodeId, u32>,
}

impl Bin {
    /// Nodes whose indexed position falls in this bin, in id order.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Number of member nodes.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the bin has no members. Indexed bins are never empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// How many of `node`'s neighbours are members of this bin.
    pub fn connections_to(&self, node: NodeId) -> u32 {
        self.connections.get(&node).copied().unwrap_or(0)
    }

    pub(crate) fn push_member(&mut self, node: NodeId) {
        self.members.push(node);
    }

    pub(crate) fn count_connection(&mut self, neighbour: NodeId) {
        *self.connections.entry(neighbour).or_insert(0) += 1;
    }
}
