//! Per-step performance metrics.

/// Timing collected during a single completed step.
///
/// All durations are in microseconds. The session overwrites these after
/// every [`step()`](crate::LayoutSession::step).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Steps completed in the current run, including this one.
    pub step: u64,
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Time spent in the force phase.
    pub force_us: u64,
    /// Time spent in the integration phase.
    pub integrate_us: u64,
    /// Time spent rebuilding the spatial index before this step (0 if
    /// no rebuild happened).
    pub rebuild_us: u64,
    /// Workers that ran force tasks.
    pub workers: usize,
}
