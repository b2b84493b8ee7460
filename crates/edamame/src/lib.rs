//! Edamame: parallel force-directed graph layout.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all edamame sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use edamame::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut graph = Graph::new();
//! graph.add_node("a").unwrap();
//! graph.add_node("b").unwrap();
//! graph.add_node("c").unwrap();
//! graph.add_edge("a", "b").unwrap();
//! graph.scatter(&mut ChaCha8Rng::seed_from_u64(7), 50.0);
//!
//! let config = LayoutConfig {
//!     max_iterations: Some(100),
//!     force_variant: ForceVariant::Binned { bin_size: 20.0 },
//!     ..LayoutConfig::default()
//! };
//! let mut session = LayoutSession::new(graph, config).unwrap();
//! assert_eq!(session.run(), 100);
//!
//! for (name, position, _radius) in session.snapshot().positions {
//!     assert!(position.is_finite(), "{name} diverged");
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `edamame-core` | `NodeId`, `Vec2`, `GraphError` |
//! | [`graph`] | `edamame-graph` | Graph store, records, random graphs |
//! | [`space`] | `edamame-space` | Spatial hash index |
//! | [`force`] | `edamame-force` | Force law and force models |
//! | [`engine`] | `edamame-engine` | Stepper, sessions, background runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared leaf types (`edamame-core`).
pub use edamame_core as types;

/// Graph store (`edamame-graph`).
///
/// [`graph::Graph`] owns nodes, adjacency and layout state;
/// [`graph::random_graph`] builds seeded test graphs.
pub use edamame_graph as graph;

/// Spatial hash index (`edamame-space`).
pub use edamame_space as space;

/// Force law and force models (`edamame-force`).
///
/// [`force::ExactForces`] for all-pairs forces, [`force::BinnedForces`]
/// for the spatially hashed approximation.
pub use edamame_force as force;

/// Layout engine (`edamame-engine`).
///
/// [`engine::LayoutSession`] for stepping on the calling thread,
/// [`engine::BackgroundLayout`] for stepping on a dedicated thread.
pub use edamame_engine as engine;

/// Common imports for typical edamame usage.
///
/// ```rust
/// use edamame::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use edamame_core::{GraphError, NodeId, Vec2};

    // Graph
    pub use edamame_graph::{random_graph, EdgeRecord, Graph, NodeRecord, NodeView};

    // Force
    pub use edamame_force::{ForceModel, ForceParams};

    // Engine
    pub use edamame_engine::{
        BackgroundLayout, CancelToken, ConfigError, ForceVariant, LayoutConfig, LayoutError,
        LayoutSession, PositionSnapshot, RebuildPolicy, SessionState, StepMetrics,
    };
}
