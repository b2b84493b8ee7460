//! Spatial hashing for the edamame layout engine.
//!
//! Node positions are partitioned into a sparse grid of square bins.
//! Besides bin membership, each bin records how many connections each
//! node has into it, which lets the force model evaluate the pull and
//! push of an entire remote bin in O(1) instead of visiting its members.
//!
//! The index is a snapshot: it reflects positions at the last
//! [`rebuild`](SpatialIndex::rebuild) and is not updated as nodes move.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bin;
pub mod error;
pub mod index;

pub use bin::{bin_of, Bin, BinKey};
pub use error::SpaceError;
pub use index::SpatialIndex;
