//! The [`SpatialIndex`]: sparse bin membership plus per-bin connection counts.

use edamame_core::{NodeId, Vec2};
use edamame_graph::Adjacency;
use indexmap::IndexMap;

use crate::bin::{bin_of, Bin, BinKey};
use crate::error::SpaceError;

/// Sparse grid of occupied bins built from a snapshot of node positions.
///
/// Bins with no members are absent. Bins iterate in the order they were
/// first occupied during the last rebuild, which makes remote-force
/// summation order reproducible.
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    bin_size: f64,
    bins: IndexMap<BinKey, Bin>,
    /// Bin each node was filed under at the last rebuild.
    indexed: Vec<BinKey>,
}

impl SpatialIndex {
    /// Create an empty index with the given bin size.
    pub fn new(bin_size: f64) -> Result<Self, SpaceError> {
        if !bin_size.is_finite() || bin_size <= 0.0 {
            return Err(SpaceError::InvalidBinSize { value: bin_size });
        }
        Ok(Self {
            bin_size,
            bins: IndexMap::new(),
            indexed: Vec::new(),
        })
    }

    /// Create an index and populate it from `positions`.
    pub fn build(
        positions: &[Vec2],
        adjacency: &Adjacency,
        bin_size: f64,
    ) -> Result<Self, SpaceError> {
        let mut index = Self::new(bin_size)?;
        index.rebuild(positions, adjacency);
        Ok(index)
    }

    /// Clear and repopulate from current positions.
    ///
    /// For every node `i` filed in bin `B`, each neighbour `n` of `i` gets
    /// its counter in `B` incremented. Afterwards
    /// `bin(B).connections_to(n)` is the number of `n`'s neighbours that
    /// live in `B`.
    pub fn rebuild(&mut self, positions: &[Vec2], adjacency: &Adjacency) {
        self.bins.clear();
        self.indexed.clear();
        self.indexed.reserve(positions.len());

        for (i, &position) in positions.iter().enumerate() {
            let id = NodeId(i as u32);
            let key = bin_of(position, self.bin_size);
            let bin = self.bins.entry(key).or_default();
            bin.push_member(id);
            for neighbour in adjacency.neighbours(id) {
                bin.count_connection(neighbour);
            }
            self.indexed.push(key);
        }

        tracing::debug!(
            nodes = positions.len(),
            bins = self.bins.len(),
            bin_size = self.bin_size,
            "spatial index rebuilt"
        );
    }

    /// Edge length of a bin.
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// The bin `position` falls in under this index's bin size.
    #[inline]
    pub fn bin_of(&self, position: Vec2) -> BinKey {
        bin_of(position, self.bin_size)
    }

    /// Number of occupied bins.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Number of nodes covered by the last rebuild.
    pub fn node_count(&self) -> usize {
        self.indexed.len()
    }

    /// True when no nodes are indexed.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Look up an occupied bin.
    pub fn bin(&self, key: BinKey) -> Option<&Bin> {
        self.bins.get(&key)
    }

    /// Iterate occupied bins in first-occupied order.
    pub fn bins(&self) -> impl ExactSizeIterator<Item = (BinKey, &Bin)> + '_ {
        self.bins.iter().map(|(&key, bin)| (key, bin))
    }

    /// Bin `node` was filed under at the last rebuild.
    pub fn indexed_bin(&self, node: NodeId) -> Option<BinKey> {
        self.indexed.get(node.index()).copied()
    }

    /// Number of nodes whose current position has left the bin they were
    /// indexed under.
    pub fn stale_count(&self, positions: &[Vec2]) -> usize {
        self.indexed
            .iter()
            .zip(positions)
            .filter(|&(&key, &pos)| key != self.bin_of(pos))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edamame_graph::Graph;

    /// Four nodes, two per bin at bin size 10:
    /// a(1,1) b(2,2) in (0,0); c(15,1) d(-3,-3) in (1,0) and (-1,-1).
    fn fixture() -> Graph {
        let mut g = Graph::new();
        for (name, x, y) in [("a", 1.0, 1.0), ("b", 2.0, 2.0), ("c", 15.0, 1.0), ("d", -3.0, -3.0)] {
            let id = g.add_node(name).unwrap();
            g.set_position(id, Vec2::new(x, y)).unwrap();
        }
        g.add_edge("a", "c").unwrap();
        g.add_edge("b", "c").unwrap();
        g.add_edge("a", "d").unwrap();
        g
    }

    #[test]
    fn rejects_non_positive_bin_size() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(SpatialIndex::new(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn membership_is_sparse_and_ordered() {
        let g = fixture();
        let index = SpatialIndex::build(g.positions(), g.adjacency(), 10.0).unwrap();
        assert_eq!(index.bin_count(), 3);
        assert_eq!(index.node_count(), 4);
        let keys: Vec<_> = index.bins().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![BinKey::new(0, 0), BinKey::new(1, 0), BinKey::new(-1, -1)]
        );
        assert_eq!(
            index.bin(BinKey::new(0, 0)).unwrap().members(),
            &[NodeId(0), NodeId(1)]
        );
        assert!(index.bin(BinKey::new(5, 5)).is_none());
    }

    #[test]
    fn connection_counts_live_in_the_members_bin() {
        let g = fixture();
        let index = SpatialIndex::build(g.positions(), g.adjacency(), 10.0).unwrap();
        let home = index.bin(BinKey::new(0, 0)).unwrap();
        // c has two neighbours (a, b) in the home bin; d has one (a).
        assert_eq!(home.connections_to(NodeId(2)), 2);
        assert_eq!(home.connections_to(NodeId(3)), 1);
        assert_eq!(home.connections_to(NodeId(0)), 0);

        let right = index.bin(BinKey::new(1, 0)).unwrap();
        assert_eq!(right.connections_to(NodeId(0)), 1);
        assert_eq!(right.connections_to(NodeId(1)), 1);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let mut g = fixture();
        let mut index = SpatialIndex::build(g.positions(), g.adjacency(), 10.0).unwrap();
        for i in 0..4 {
            g.set_position(NodeId(i), Vec2::new(0.5, 0.5)).unwrap();
        }
        assert_eq!(index.stale_count(g.positions()), 2);
        index.rebuild(g.positions(), g.adjacency());
        assert_eq!(index.bin_count(), 1);
        assert_eq!(index.stale_count(g.positions()), 0);
        assert_eq!(index.indexed_bin(NodeId(3)), Some(BinKey::new(0, 0)));
    }

    #[test]
    fn empty_positions_give_empty_index() {
        let g = Graph::new();
        let index = SpatialIndex::build(g.positions(), g.adjacency(), 1.0).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.indexed_bin(NodeId(0)), None);
    }
}
