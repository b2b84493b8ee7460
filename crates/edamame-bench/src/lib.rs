//! Benchmark profiles for the edamame layout engine.
//!
//! - [`scaling_graph`]: the random graphs of the scaling profile,
//!   `100 * 2^doublings` nodes with edge probability 0.1
//! - [`scaling_config`]: the force coefficients and step count used
//!   with them
//! - [`SCALING_BIN_SIZE`]: bin size for the binned variant

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use edamame_engine::{ForceVariant, LayoutConfig};
use edamame_graph::{random_graph, Graph};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Edge probability of the scaling profile.
pub const SCALING_EDGE_PROBABILITY: f64 = 0.1;

/// Steps per measured layout run.
pub const SCALING_STEPS: u64 = 100;

/// Bin size for the binned variant of the scaling profile.
pub const SCALING_BIN_SIZE: f64 = 1000.0;

/// Half-width of the initial placement square.
pub const SCATTER_HALF_EXTENT: f64 = 50.0;

/// Node count at a given doubling: `100 * 2^doublings`.
pub fn scaling_nodes(doublings: u32) -> u32 {
    100 << doublings
}

/// Random graph of `scaling_nodes(doublings)` nodes, scattered over
/// `[-50, 50)²`, fully determined by `seed`.
pub fn scaling_graph(doublings: u32, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = random_graph(scaling_nodes(doublings), SCALING_EDGE_PROBABILITY, &mut rng);
    graph.scatter(&mut rng, SCATTER_HALF_EXTENT);
    graph
}

/// Layout configuration for the scaling profile:
/// `k = 0.1, step = 0.1, equilibrium = 1.0, repulsion = 1.0,
/// friction = 0.001`, [`SCALING_STEPS`] steps.
pub fn scaling_config(variant: ForceVariant, max_workers: usize) -> LayoutConfig {
    LayoutConfig {
        spring_constant: 0.1,
        step_size: 0.1,
        equilibrium_distance: 1.0,
        repulsion: 1.0,
        friction: 0.001,
        max_workers,
        max_iterations: Some(SCALING_STEPS),
        force_variant: variant,
        progress_interval: 0,
        ..LayoutConfig::default()
    }
}
