//! Error types for spatial index construction.

use thiserror::Error;

/// Errors arising from spatial index configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpaceError {
    /// Bin size must be finite and strictly positive.
    #[error("bin size must be finite and positive, got {value}")]
    InvalidBinSize {
        /// The rejected bin size.
        value: f64,
    },
}
