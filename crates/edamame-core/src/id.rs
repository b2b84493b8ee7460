//! Strongly-typed node identifiers.

use std::fmt;

/// Dense index of a node within a graph.
///
/// Nodes are stored in insertion order and never deleted, so `NodeId(n)`
/// refers to the n-th node added for the lifetime of the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The id as a slice index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_inner_value() {
        assert_eq!(NodeId(7).index(), 7);
        assert_eq!(NodeId::from(3u32), NodeId(3));
    }

    #[test]
    fn display_prints_inner_value() {
        assert_eq!(NodeId(12).to_string(), "12");
    }
}
