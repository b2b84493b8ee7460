//! Spring-electrical force model for the edamame layout engine.
//!
//! Connected nodes are joined by springs with a rest length; every other
//! pair repels with an inverse-square law. Two [`ForceModel`]s share the
//! same pair law:
//!
//! - [`ExactForces`]: every node interacts with every other node, O(n).
//! - [`BinnedForces`]: nodes interact exactly with their home bin and
//!   approximately with every other occupied bin, O(bin size + bins).
//!
//! In the one-bin limit the two models perform the same sums in the same
//! order and agree bit for bit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binned;
pub mod exact;
pub mod law;
pub mod model;

pub use binned::BinnedForces;
pub use exact::ExactForces;
pub use law::{bin_force, pair_force, ForceParams, MIN_DISTANCE};
pub use model::ForceModel;
