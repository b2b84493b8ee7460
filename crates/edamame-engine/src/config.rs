//! Layout configuration and validation.
//!
//! [`LayoutConfig`] is the input for constructing a
//! [`LayoutSession`](crate::LayoutSession).
//! [`validate()`](LayoutConfig::validate) checks every numeric field once,
//! before any stepping, so configuration problems never surface mid-run.

use std::num::NonZeroU32;

use edamame_force::ForceParams;

use crate::error::ConfigError;

// ── ForceVariant ───────────────────────────────────────────────────

/// Which force model a session uses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ForceVariant {
    /// Every node interacts with every other node.
    #[default]
    Exact,
    /// Exact forces within the home bin, aggregated forces from other bins.
    Binned {
        /// Edge length of a spatial bin. Must be finite and positive.
        bin_size: f64,
    },
}

// ── RebuildPolicy ──────────────────────────────────────────────────

/// When a binned session rebuilds its spatial index.
///
/// The index is always built when a run starts. Ignored by
/// [`ForceVariant::Exact`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RebuildPolicy {
    /// Build once per run.
    #[default]
    OnStart,
    /// Rebuild before every step.
    EveryStep,
    /// Rebuild before every `n`th step of a run.
    Every(NonZeroU32),
}

impl RebuildPolicy {
    /// Whether the index must be rebuilt before step `completed + 1` of a
    /// run that has already finished `completed` steps.
    pub fn rebuild_before(self, completed: u64) -> bool {
        if completed == 0 {
            return false;
        }
        match self {
            Self::OnStart => false,
            Self::EveryStep => true,
            Self::Every(n) => completed % u64::from(n.get()) == 0,
        }
    }
}

// ── LayoutConfig ───────────────────────────────────────────────────

/// Complete configuration for one layout session.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Spring coefficient for connected pairs. Default: 0.1.
    pub spring_constant: f64,
    /// Integration step size. Default: 0.1. Must be positive.
    pub step_size: f64,
    /// Rest length of a spring. Default: 1.0.
    pub equilibrium_distance: f64,
    /// Inverse-square repulsion coefficient. Default: 80.0.
    pub repulsion: f64,
    /// Fractional velocity damping per step. Default: 0.001.
    pub friction: f64,
    /// Upper bound on force-phase worker threads. Default: available
    /// parallelism. The session uses `min(max_workers, node_count)`.
    pub max_workers: usize,
    /// Steps per run. `None` runs until cancelled. Default: `Some(1)`.
    pub max_iterations: Option<u64>,
    /// Exact or binned force model. Default: exact.
    pub force_variant: ForceVariant,
    /// Spatial index maintenance for the binned model. Default: on start.
    pub rebuild: RebuildPolicy,
    /// Emit a progress event every this many steps. 0 disables. Default: 50.
    pub progress_interval: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spring_constant: 0.1,
            step_size: 0.1,
            equilibrium_distance: 1.0,
            repulsion: 80.0,
            friction: 0.001,
            max_workers: default_worker_count(),
            max_iterations: Some(1),
            force_variant: ForceVariant::Exact,
            rebuild: RebuildPolicy::OnStart,
            progress_interval: 50,
        }
    }
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl LayoutConfig {
    /// Validate all numeric fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Step size drives both phases.
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(ConfigError::InvalidStepSize {
                value: self.step_size,
            });
        }
        // 2. Binned variant needs a usable grid.
        if let ForceVariant::Binned { bin_size } = self.force_variant {
            if !bin_size.is_finite() || bin_size <= 0.0 {
                return Err(ConfigError::InvalidBinSize { value: bin_size });
            }
        }
        // 3. At least one worker.
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidWorkerCount);
        }
        // 4. Coefficients must be finite; repulsion and friction can't be negative.
        let finite = [
            ("spring_constant", self.spring_constant),
            ("equilibrium_distance", self.equilibrium_distance),
            ("repulsion", self.repulsion),
            ("friction", self.friction),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [("repulsion", self.repulsion), ("friction", self.friction)] {
            if value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// The force law coefficients.
    pub fn force_params(&self) -> ForceParams {
        ForceParams {
            spring_constant: self.spring_constant,
            equilibrium_distance: self.equilibrium_distance,
            repulsion: self.repulsion,
        }
    }

    /// Worker count for a graph of `node_count` nodes: `max_workers`
    /// capped at `node_count`, never below 1.
    pub fn resolved_workers(&self, node_count: usize) -> usize {
        self.max_workers.min(node_count).max(1)
    }
}
