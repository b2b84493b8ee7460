//! Seeded random graph generation for tests, benches and demos.

use edamame_core::NodeId;
use rand::Rng;

use crate::graph::Graph;

/// Build an Erdős–Rényi style graph with `num_nodes` nodes named
/// `"0"`..`"n-1"`.
///
/// Each unordered pair `(i, j)` with `i < j` is connected with
/// probability `edge_probability`, drawn in `i`-major order, so a given
/// generator state always yields the same graph. All nodes start at the
/// origin; call [`Graph::scatter`] to place them.
pub fn random_graph<R: Rng>(num_nodes: u32, edge_probability: f64, rng: &mut R) -> Graph {
    let mut graph = Graph::with_capacity(num_nodes as usize);
    for i in 0..num_nodes {
        // Names are the decimal ids, so they are unique by construction.
        graph.push_fresh_node(i.to_string());
    }
    for i in 0..num_nodes {
        for j in (i + 1)..num_nodes {
            if rng.random::<f64>() < edge_probability {
                graph.connect(NodeId(i), NodeId(j));
            }
        }
    }
    graph
}
