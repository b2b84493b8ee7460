//! Configuration and session errors.

use edamame_core::GraphError;
use edamame_space::SpaceError;
use thiserror::Error;

/// Errors detected by [`LayoutConfig::validate()`](crate::LayoutConfig::validate)
/// or while preparing a session.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Bin size is NaN, infinite, zero, or negative.
    #[error("bin_size must be finite and positive, got {value}")]
    InvalidBinSize {
        /// The invalid value.
        value: f64,
    },
    /// Step size is NaN, infinite, zero, or negative.
    #[error("step_size must be finite and positive, got {value}")]
    InvalidStepSize {
        /// The invalid value.
        value: f64,
    },
    /// `max_workers` is zero.
    #[error("max_workers must be at least 1")]
    InvalidWorkerCount,
    /// A force coefficient is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Field name in [`LayoutConfig`](crate::LayoutConfig).
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// Layout requested on a graph with no nodes.
    #[error("cannot lay out an empty graph")]
    EmptyGraph,
    /// A background thread could not be spawned.
    #[error("thread spawn failed: {reason}")]
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::InvalidBinSize { value } => Self::InvalidBinSize { value },
        }
    }
}

/// Top-level error for layout operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// The session configuration was rejected.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    /// A graph operation failed.
    #[error("graph: {0}")]
    Graph(#[from] GraphError),
}
