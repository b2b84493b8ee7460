//! The [`LayoutSession`]: repeated stepping over an owned graph.
//!
//! A session owns its [`Graph`] for the whole run, so topology cannot
//! change mid-run and positions are never observed half-updated: every
//! accessor takes `&self`, which the borrow checker keeps disjoint from
//! the `&mut self` of [`step()`](LayoutSession::step).
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start()--> Stepping --max_iterations reached--> Finished
//!                      |
//!                      +--cancel() observed between steps--> Cancelled
//! ```
//!
//! `start()` from `Finished` or `Cancelled` begins a new run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use edamame_core::Vec2;
use edamame_force::{BinnedForces, ExactForces};
use edamame_graph::Graph;
use edamame_space::SpatialIndex;

use crate::config::{ForceVariant, LayoutConfig};
use crate::error::{ConfigError, LayoutError};
use crate::metrics::StepMetrics;
use crate::snapshot::PositionSnapshot;
use crate::stepper::ParallelStepper;

// Compile-time assertion: a session can move to a background thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LayoutSession>();
    }
};

// ── CancelToken ──────────────────────────────────────────────────

/// Shared cancellation flag, observed between steps.
///
/// Clones share the flag. Cancelling never interrupts a step in flight.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ── SessionState ─────────────────────────────────────────────────

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created, no run started.
    Idle,
    /// A run is in progress.
    Stepping,
    /// The run completed `max_iterations` steps.
    Finished,
    /// The run observed a cancellation request.
    Cancelled,
}

// ── LayoutSession ────────────────────────────────────────────────

/// Drives the parallel stepper over an owned graph.
pub struct LayoutSession {
    graph: Graph,
    config: LayoutConfig,
    stepper: ParallelStepper,
    /// Present only for the binned variant.
    index: Option<SpatialIndex>,
    state: SessionState,
    completed: u64,
    cancel: CancelToken,
    metrics: StepMetrics,
    /// Rebuild time from `start()`, charged to the run's first step.
    pending_rebuild_us: u64,
}

impl LayoutSession {
    /// Validate `config` and take ownership of `graph`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if a configuration field is out of range or the
    /// graph has no nodes. Nothing is stepped on error.
    pub fn new(graph: Graph, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        if graph.is_empty() {
            return Err(ConfigError::EmptyGraph.into());
        }
        let workers = config.resolved_workers(graph.node_count());
        let stepper = ParallelStepper::new(workers, config.step_size, config.friction);
        let index = match config.force_variant {
            ForceVariant::Exact => None,
            ForceVariant::Binned { bin_size } => {
                Some(SpatialIndex::new(bin_size).map_err(ConfigError::from)?)
            }
        };
        Ok(Self {
            graph,
            config,
            stepper,
            index,
            state: SessionState::Idle,
            completed: 0,
            cancel: CancelToken::new(),
            metrics: StepMetrics::default(),
            pending_rebuild_us: 0,
        })
    }

    /// Begin a run. No-op while a run is already in progress.
    ///
    /// Builds the spatial index for the binned variant. Starting after a
    /// finished or cancelled run clears the cancellation flag; a cancel
    /// issued before the first run is kept and stops it immediately.
    pub fn start(&mut self) {
        match self.state {
            SessionState::Stepping => return,
            SessionState::Finished | SessionState::Cancelled => self.cancel.reset(),
            SessionState::Idle => {}
        }
        self.completed = 0;
        self.pending_rebuild_us = self.rebuild_index();
        self.state = SessionState::Stepping;
        tracing::info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            workers = self.stepper.workers(),
            variant = ?self.config.force_variant,
            max_iterations = ?self.config.max_iterations,
            "layout started"
        );
    }

    /// Execute one step. Returns `true` while more work remains.
    ///
    /// Starts a run if the session is idle. Cancellation is checked
    /// before the step; a started step always completes both phases.
    pub fn step(&mut self) -> bool {
        match self.state {
            SessionState::Idle => self.start(),
            SessionState::Stepping => {}
            SessionState::Finished | SessionState::Cancelled => return false,
        }
        if self.cancel.is_cancelled() {
            self.state = SessionState::Cancelled;
            tracing::info!(steps = self.completed, "layout cancelled");
            return false;
        }
        if self.iterations_done() {
            self.finish();
            return false;
        }

        let started = Instant::now();
        let mut rebuild_us = std::mem::take(&mut self.pending_rebuild_us);
        if self.index.is_some() && self.config.rebuild.rebuild_before(self.completed) {
            rebuild_us += self.rebuild_index();
        }

        let params = self.config.force_params();
        let (adjacency, positions, velocities) = self.graph.split_mut();
        let force_start = Instant::now();
        let workers = match &self.index {
            None => {
                let model = ExactForces::new(params, adjacency);
                self.stepper.force_phase(&model, positions, velocities)
            }
            Some(index) => {
                let model = BinnedForces::new(params, adjacency, index);
                self.stepper.force_phase(&model, positions, velocities)
            }
        };
        let force_us = elapsed_us(force_start);
        let integrate_start = Instant::now();
        self.stepper.integrate(positions, velocities);
        let integrate_us = elapsed_us(integrate_start);

        self.completed += 1;
        self.metrics = StepMetrics {
            step: self.completed,
            total_us: elapsed_us(started),
            force_us,
            integrate_us,
            rebuild_us,
            workers,
        };
        tracing::trace!(
            step = self.completed,
            total_us = self.metrics.total_us,
            force_us,
            integrate_us,
            "step complete"
        );
        self.log_progress();

        if self.iterations_done() {
            self.finish();
            return false;
        }
        true
    }

    /// Start a run and step until it finishes or is cancelled.
    ///
    /// Returns the number of steps completed. With `max_iterations: None`
    /// this only returns after [`cancel()`](Self::cancel).
    pub fn run(&mut self) -> u64 {
        self.start();
        while self.step() {}
        self.completed
    }

    /// Request cancellation; observed before the next step.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token sharing this session's cancellation flag.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Node positions in id order as of the last completed step.
    pub fn current_positions(&self) -> &[Vec2] {
        self.graph.positions()
    }

    /// Owned copy of `(name, position, radius)` per node.
    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot::capture(&self.graph, self.completed)
    }

    /// The graph being laid out.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// End the session and return the graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// The validated configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Steps completed in the current (or last) run.
    pub fn steps_completed(&self) -> u64 {
        self.completed
    }

    /// Metrics from the last completed step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// Worker bound used by the stepper: `min(max_workers, node_count)`.
    pub fn workers(&self) -> usize {
        self.stepper.workers()
    }

    /// The spatial index, for the binned variant.
    pub fn spatial_index(&self) -> Option<&SpatialIndex> {
        self.index.as_ref()
    }

    fn iterations_done(&self) -> bool {
        self.config
            .max_iterations
            .is_some_and(|max| self.completed >= max)
    }

    fn finish(&mut self) {
        self.state = SessionState::Finished;
        tracing::info!(steps = self.completed, "layout finished");
    }

    /// Rebuild the spatial index if there is one; returns elapsed µs.
    fn rebuild_index(&mut self) -> u64 {
        let Some(index) = self.index.as_mut() else {
            return 0;
        };
        let started = Instant::now();
        index.rebuild(self.graph.positions(), self.graph.adjacency());
        elapsed_us(started)
    }

    fn log_progress(&self) {
        let interval = self.config.progress_interval;
        if interval == 0 || self.completed % interval != 0 {
            return;
        }
        match self.config.max_iterations {
            Some(max) => tracing::debug!(
                step = self.completed,
                max,
                done = self.completed as f64 / max as f64,
                "layout progress"
            ),
            None => tracing::debug!(step = self.completed, "layout progress"),
        }
    }
}

fn elapsed_us(since: Instant) -> u64 {
    since.elapsed().as_micros() as u64
}

impl std::fmt::Debug for LayoutSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSession")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("state", &self.state)
            .field("completed", &self.completed)
            .field("workers", &self.stepper.workers())
            .field("variant", &self.config.force_variant)
            .finish()
    }
}
