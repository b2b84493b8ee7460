//! Exact and binned force models agree where the binned approximation
//! is exact, and both are deterministic.

use approx::assert_abs_diff_eq;
use edamame_core::{NodeId, Vec2};
use edamame_force::{bin_force, pair_force, BinnedForces, ExactForces, ForceModel, ForceParams};
use edamame_graph::Graph;
use edamame_space::{BinKey, SpatialIndex};
use edamame_test_utils::{placed_graph, seeded_random_graph};
use proptest::prelude::*;

const PARAMS: ForceParams = ForceParams {
    spring_constant: 0.1,
    equilibrium_distance: 1.0,
    repulsion: 80.0,
};

/// Random graph shifted into the positive quadrant so a single large bin
/// holds every node.
fn one_bin_graph(n: u32, p: f64, seed: u64) -> Graph {
    let mut g = seeded_random_graph(n, p, 50.0, seed);
    for i in 0..n {
        let id = NodeId(i);
        let pos = g.position(id).unwrap();
        g.set_position(id, pos + Vec2::new(50.0, 50.0)).unwrap();
    }
    g
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn binned_matches_exact_in_one_bin(n in 2u32..50, p in 0.0f64..0.5, seed in any::<u64>()) {
        let g = one_bin_graph(n, p, seed);
        let index = SpatialIndex::build(g.positions(), g.adjacency(), 1000.0).unwrap();
        prop_assert_eq!(index.bin_count(), 1);

        let exact = ExactForces::new(PARAMS, g.adjacency());
        let binned = BinnedForces::new(PARAMS, g.adjacency(), &index);
        for i in 0..n {
            let a = exact.net_force(NodeId(i), g.positions());
            let b = binned.net_force(NodeId(i), g.positions());
            prop_assert!((a.x - b.x).abs() <= 1e-9 * (1.0 + a.x.abs()));
            prop_assert!((a.y - b.y).abs() <= 1e-9 * (1.0 + a.y.abs()));
        }
    }
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let g = seeded_random_graph(60, 0.1, 50.0, 99);
    let index = SpatialIndex::build(g.positions(), g.adjacency(), 20.0).unwrap();
    let models: [&dyn ForceModel; 2] = [
        &ExactForces::new(PARAMS, g.adjacency()),
        &BinnedForces::new(PARAMS, g.adjacency(), &index),
    ];
    for model in models {
        for i in 0..60 {
            let first = model.net_force(NodeId(i), g.positions());
            let second = model.net_force(NodeId(i), g.positions());
            assert_eq!(first.x.to_bits(), second.x.to_bits(), "{}", model.name());
            assert_eq!(first.y.to_bits(), second.y.to_bits(), "{}", model.name());
        }
    }
}

#[test]
fn remote_bin_acts_as_point_mass_at_origin() {
    // Node 0 alone in bin (0,0); nodes 1 and 2 in bin (1,0); 0 is
    // connected to 1 only.
    let g = placed_graph(&[(2.0, 3.0), (14.0, 1.0), (18.0, 9.0)], &[(0, 1)]);
    let index = SpatialIndex::build(g.positions(), g.adjacency(), 10.0).unwrap();
    assert_eq!(index.bin_count(), 2);

    let binned = BinnedForces::new(PARAMS, g.adjacency(), &index);
    let got = binned.net_force(NodeId(0), g.positions());
    let expected = bin_force(
        &PARAMS,
        Vec2::new(2.0, 3.0),
        BinKey::new(1, 0).origin(10.0),
        1,
        1,
    );
    assert_abs_diff_eq!(got.x, expected.x, epsilon = 1e-12);
    assert_abs_diff_eq!(got.y, expected.y, epsilon = 1e-12);
}

#[test]
fn home_bin_members_interact_exactly() {
    // Nodes 1 and 2 share bin (1,0); node 0 is remote to both.
    let g = placed_graph(&[(2.0, 3.0), (14.0, 1.0), (18.0, 9.0)], &[(0, 1), (1, 2)]);
    let index = SpatialIndex::build(g.positions(), g.adjacency(), 10.0).unwrap();
    let binned = BinnedForces::new(PARAMS, g.adjacency(), &index);

    let here = Vec2::new(14.0, 1.0);
    let local = pair_force(&PARAMS, here, Vec2::new(18.0, 9.0), true);
    let remote = bin_force(&PARAMS, here, BinKey::new(0, 0).origin(10.0), 1, 0);
    let expected = local + remote;
    let got = binned.net_force(NodeId(1), g.positions());
    assert_abs_diff_eq!(got.x, expected.x, epsilon = 1e-12);
    assert_abs_diff_eq!(got.y, expected.y, epsilon = 1e-12);
}

#[test]
fn drifted_node_does_not_push_itself() {
    // Index with node 0 in bin (0,0), then move it into bin (1,0)
    // without rebuilding. Bin (0,0) now holds only node 0 itself.
    let mut g = placed_graph(&[(2.0, 3.0), (14.0, 1.0)], &[]);
    let index = SpatialIndex::build(g.positions(), g.adjacency(), 10.0).unwrap();
    g.set_position(NodeId(0), Vec2::new(12.0, 3.0)).unwrap();

    let binned = BinnedForces::new(PARAMS, g.adjacency(), &index);
    let got = binned.net_force(NodeId(0), g.positions());
    let expected = pair_force(&PARAMS, Vec2::new(12.0, 3.0), Vec2::new(14.0, 1.0), false);
    assert_abs_diff_eq!(got.x, expected.x, epsilon = 1e-12);
    assert_abs_diff_eq!(got.y, expected.y, epsilon = 1e-12);
}

#[test]
fn exact_model_sums_all_pairs() {
    let g = placed_graph(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)], &[(0, 1)]);
    let exact = ExactForces::new(PARAMS, g.adjacency());
    let got = exact.net_force(NodeId(0), g.positions());
    let expected = pair_force(&PARAMS, Vec2::ZERO, Vec2::new(3.0, 0.0), true)
        + pair_force(&PARAMS, Vec2::ZERO, Vec2::new(0.0, 4.0), false);
    assert_abs_diff_eq!(got.x, expected.x, epsilon = 1e-12);
    assert_abs_diff_eq!(got.y, expected.y, epsilon = 1e-12);
}
