//! Reusable graph fixtures.
//!
//! - [`pair_graph`]: two nodes on the x axis, optionally connected.
//! - [`path_graph`]: a chain of nodes spaced evenly along x.
//! - [`grid_graph`]: a lattice with 4-neighbour edges.
//! - [`placed_graph`]: nodes at explicit positions with explicit edges.
//! - [`seeded_random_graph`]: random topology and placement from a seed.

use edamame_core::{NodeId, Vec2};
use edamame_graph::{random_graph, Graph};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Nodes `"0"` at the origin and `"1"` at `(distance, 0)`.
pub fn pair_graph(distance: f64, connected: bool) -> Graph {
    let mut g = placed_graph(&[(0.0, 0.0), (distance, 0.0)], &[]);
    if connected {
        g.add_edge_ids(NodeId(0), NodeId(1)).unwrap();
    }
    g
}

/// `n` nodes at `(i * spacing, 0)`, each connected to the next.
pub fn path_graph(n: u32, spacing: f64) -> Graph {
    let positions: Vec<(f64, f64)> = (0..n).map(|i| (f64::from(i) * spacing, 0.0)).collect();
    let edges: Vec<(u32, u32)> = (1..n).map(|i| (i - 1, i)).collect();
    placed_graph(&positions, &edges)
}

/// `rows * cols` nodes on a lattice with spacing `spacing`, each
/// connected to its right and lower neighbour.
pub fn grid_graph(rows: u32, cols: u32, spacing: f64) -> Graph {
    let mut positions = Vec::with_capacity((rows * cols) as usize);
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let i = r * cols + c;
            positions.push((f64::from(c) * spacing, f64::from(r) * spacing));
            if c + 1 < cols {
                edges.push((i, i + 1));
            }
            if r + 1 < rows {
                edges.push((i, i + cols));
            }
        }
    }
    placed_graph(&positions, &edges)
}

/// Nodes named `"0"`.. at the given positions, joined by `edges` (by index).
pub fn placed_graph(positions: &[(f64, f64)], edges: &[(u32, u32)]) -> Graph {
    let mut g = Graph::with_capacity(positions.len());
    for (i, &(x, y)) in positions.iter().enumerate() {
        let id = g.add_node(i.to_string()).unwrap();
        g.set_position(id, Vec2::new(x, y)).unwrap();
    }
    for &(a, b) in edges {
        g.add_edge_ids(NodeId(a), NodeId(b)).unwrap();
    }
    g
}

/// Random graph scattered over `[-half_extent, half_extent)²`, fully
/// determined by `seed`.
pub fn seeded_random_graph(n: u32, edge_probability: f64, half_extent: f64, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut g = random_graph(n, edge_probability, &mut rng);
    g.scatter(&mut rng, half_extent);
    g
}

/// Largest per-component absolute difference between two position sets.
pub fn max_abs_diff(a: &[Vec2], b: &[Vec2]) -> f64 {
    assert_eq!(a.len(), b.len(), "position sets differ in length");
    a.iter()
        .zip(b)
        .map(|(p, q)| (p.x - q.x).abs().max((p.y - q.y).abs()))
        .fold(0.0, f64::max)
}

/// Panic unless every position matches within `tolerance`.
#[track_caller]
pub fn assert_positions_close(a: &[Vec2], b: &[Vec2], tolerance: f64) {
    let diff = max_abs_diff(a, b);
    assert!(
        diff <= tolerance,
        "positions differ by {diff}, tolerance {tolerance}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_graph_places_nodes() {
        let g = pair_graph(2.5, true);
        assert_eq!(g.positions(), &[Vec2::ZERO, Vec2::new(2.5, 0.0)]);
        assert!(g.contains_edge("0", "1"));
        assert!(!pair_graph(1.0, false).contains_edge("0", "1"));
    }

    #[test]
    fn path_and_grid_edge_counts() {
        assert_eq!(path_graph(5, 1.0).edge_count(), 4);
        assert_eq!(grid_graph(3, 4, 1.0).edge_count(), 3 * 3 + 2 * 4);
    }

    #[test]
    fn seeded_graph_is_reproducible() {
        let a = seeded_random_graph(25, 0.2, 50.0, 11);
        let b = seeded_random_graph(25, 0.2, 50.0, 11);
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.edge_count(), b.edge_count());
    }

    #[test]
    fn max_abs_diff_picks_largest_component() {
        let a = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        let b = [Vec2::new(0.1, 0.0), Vec2::new(1.0, 0.5)];
        assert!((max_abs_diff(&a, &b) - 0.5).abs() < 1e-12);
    }
}
