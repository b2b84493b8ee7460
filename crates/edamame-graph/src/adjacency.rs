//! Symmetric adjacency relation over dense node indices.

use edamame_core::NodeId;
use indexmap::IndexSet;

/// Undirected adjacency: one neighbour set per node.
///
/// Every insertion writes both directions, so `a ∈ N(b)` iff `b ∈ N(a)`.
/// Neighbour sets preserve insertion order, which keeps force summation
/// order (and therefore floating-point results) reproducible.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    sets: Vec<IndexSet<NodeId>>,
    edge_count: usize,
}

impl Adjacency {
    /// Register an empty neighbour set for a newly added node.
    pub(crate) fn push_node(&mut self) {
        self.sets.push(IndexSet::new());
    }

    /// Insert the undirected edge `{a, b}`.
    ///
    /// Returns `false` if the edge was already present. Both ids must be
    /// in range; the caller resolves names first.
    pub(crate) fn insert(&mut self, a: NodeId, b: NodeId) -> bool {
        let inserted = self.sets[a.index()].insert(b);
        self.sets[b.index()].insert(a);
        if inserted {
            self.edge_count += 1;
        }
        inserted
    }

    /// Whether `a` and `b` are adjacent. Out-of-range ids are never adjacent.
    #[inline]
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.sets
            .get(a.index())
            .is_some_and(|set| set.contains(&b))
    }

    /// Neighbours of `id` in insertion order.
    pub fn neighbours(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.sets
            .get(id.index())
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of neighbours of `id`.
    pub fn degree(&self, id: NodeId) -> usize {
        self.sets.get(id.index()).map_or(0, IndexSet::len)
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of nodes with a neighbour set.
    pub fn node_count(&self) -> usize {
        self.sets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_nodes(n: usize) -> Adjacency {
        let mut adj = Adjacency::default();
        for _ in 0..n {
            adj.push_node();
        }
        adj
    }

    #[test]
    fn insert_is_symmetric() {
        let mut adj = with_nodes(3);
        assert!(adj.insert(NodeId(0), NodeId(2)));
        assert!(adj.is_connected(NodeId(0), NodeId(2)));
        assert!(adj.is_connected(NodeId(2), NodeId(0)));
        assert!(!adj.is_connected(NodeId(0), NodeId(1)));
    }

    #[test]
    fn reinsert_is_idempotent() {
        let mut adj = with_nodes(2);
        assert!(adj.insert(NodeId(0), NodeId(1)));
        assert!(!adj.insert(NodeId(1), NodeId(0)));
        assert_eq!(adj.edge_count(), 1);
        assert_eq!(adj.degree(NodeId(0)), 1);
        assert_eq!(adj.degree(NodeId(1)), 1);
    }

    #[test]
    fn neighbours_keep_insertion_order() {
        let mut adj = with_nodes(4);
        adj.insert(NodeId(0), NodeId(3));
        adj.insert(NodeId(0), NodeId(1));
        adj.insert(NodeId(0), NodeId(2));
        let order: Vec<_> = adj.neighbours(NodeId(0)).collect();
        assert_eq!(order, vec![NodeId(3), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn out_of_range_ids_are_unconnected() {
        let adj = with_nodes(1);
        assert!(!adj.is_connected(NodeId(5), NodeId(0)));
        assert_eq!(adj.neighbours(NodeId(9)).count(), 0);
        assert_eq!(adj.degree(NodeId(9)), 0);
    }
}
