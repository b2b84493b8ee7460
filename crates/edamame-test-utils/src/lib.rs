//! Test utilities for edamame development.
//!
//! Provides small hand-placed graphs for exact force checks, seeded
//! random graphs for equivalence properties, and position comparison
//! helpers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    assert_positions_close, grid_graph, max_abs_diff, pair_graph, path_graph,
    placed_graph, seeded_random_graph,
};
