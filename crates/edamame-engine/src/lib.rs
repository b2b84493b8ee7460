//! Layout engine for edamame: parallel stepping and layout sessions.
//!
//! - [`ParallelStepper`] runs one two-phase step (force accumulation,
//!   then integration) across a bounded [`WorkerPool`].
//! - [`LayoutSession`] validates a [`LayoutConfig`], owns the graph,
//!   picks the exact or binned force model, maintains the spatial index,
//!   and steps until `max_iterations` or cancellation.
//! - [`BackgroundLayout`] runs a session on its own thread and publishes
//!   a [`PositionSnapshot`] after every completed step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod background;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pool;
pub mod session;
pub mod snapshot;
pub mod stepper;

pub use background::BackgroundLayout;
pub use config::{ForceVariant, LayoutConfig, RebuildPolicy};
pub use error::{ConfigError, LayoutError};
pub use metrics::StepMetrics;
pub use pool::WorkerPool;
pub use session::{CancelToken, LayoutSession, SessionState};
pub use snapshot::PositionSnapshot;
pub use stepper::ParallelStepper;
