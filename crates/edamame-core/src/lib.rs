//! Core types and errors for the edamame layout engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! node identifier, the 2D vector used for positions, velocities and
//! forces, and the error type shared by graph construction and layout.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod vec2;

pub use error::GraphError;
pub use id::NodeId;
pub use vec2::Vec2;
