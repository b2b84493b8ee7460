//! Two-phase parallel step: force accumulation, then integration.
//!
//! # Ownership
//!
//! Positions and velocities are separate slices. During the force phase
//! every worker reads the whole position slice through a shared borrow
//! and owns a disjoint `chunks_mut` window of the velocity slice, so no
//! node's velocity has two writers. During integration each worker owns
//! matching windows of both slices. The borrow checker enforces both
//! partitions; [`WorkerPool::run`] returning is the barrier between them.
//!
//! Each node's force sum is computed by one worker in a fixed order, so
//! results do not depend on the worker count.

use edamame_core::{NodeId, Vec2};
use edamame_force::ForceModel;

use crate::pool::WorkerPool;

/// Chunks queued per worker; more chunks balance uneven force costs.
const CHUNKS_PER_WORKER: usize = 4;

/// Executes force and integration phases over a bounded [`WorkerPool`].
#[derive(Clone, Copy, Debug)]
pub struct ParallelStepper {
    pool: WorkerPool,
    step_size: f64,
    friction: f64,
}

impl ParallelStepper {
    /// Create a stepper with at most `workers` workers.
    pub fn new(workers: usize, step_size: f64, friction: f64) -> Self {
        Self {
            pool: WorkerPool::new(workers),
            step_size,
            friction,
        }
    }

    /// Upper bound on workers per phase.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Integration step size.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    fn chunk_len(&self, len: usize) -> usize {
        len.div_ceil(self.pool.workers() * CHUNKS_PER_WORKER).max(1)
    }

    /// Phase 1: `velocity[i] += net_force(i) * step_size` for every node.
    ///
    /// Positions are read-only for the whole phase. Returns the number of
    /// workers used.
    pub fn force_phase<M>(&self, model: &M, positions: &[Vec2], velocities: &mut [Vec2]) -> usize
    where
        M: ForceModel + ?Sized,
    {
        debug_assert_eq!(positions.len(), velocities.len());
        let chunk = self.chunk_len(velocities.len());
        let step = self.step_size;
        let tasks = velocities
            .chunks_mut(chunk)
            .enumerate()
            .map(|(c, window)| (c * chunk, window));
        self.pool.run(tasks, |(start, window)| {
            for (offset, velocity) in window.iter_mut().enumerate() {
                let id = NodeId((start + offset) as u32);
                *velocity += model.net_force(id, positions) * step;
            }
        })
    }

    /// Phase 2: `position += velocity * step_size`, then
    /// `velocity -= velocity * friction * step_size`, per node.
    ///
    /// Returns the number of workers used.
    pub fn integrate(&self, positions: &mut [Vec2], velocities: &mut [Vec2]) -> usize {
        debug_assert_eq!(positions.len(), velocities.len());
        let chunk = self.chunk_len(positions.len());
        let step = self.step_size;
        let friction = self.friction;
        let tasks = positions.chunks_mut(chunk).zip(velocities.chunks_mut(chunk));
        self.pool.run(tasks, |(ps, vs)| {
            for (p, v) in ps.iter_mut().zip(vs.iter_mut()) {
                *p += *v * step;
                *v -= *v * friction * step;
            }
        })
    }

    /// Both phases back to back. Returns the larger worker count used.
    pub fn step<M>(&self, model: &M, positions: &mut [Vec2], velocities: &mut [Vec2]) -> usize
    where
        M: ForceModel + ?Sized,
    {
        let forced = self.force_phase(model, positions, velocities);
        let integrated = self.integrate(positions, velocities);
        forced.max(integrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Constant force `(node index, 1)` regardless of positions.
    struct IndexForce;

    impl ForceModel for IndexForce {
        fn name(&self) -> &'static str {
            "index"
        }

        fn net_force(&self, node: NodeId, _positions: &[Vec2]) -> Vec2 {
            Vec2::new(f64::from(node.0), 1.0)
        }
    }

    #[test]
    fn force_phase_writes_only_velocities() {
        let stepper = ParallelStepper::new(3, 0.5, 0.0);
        let positions = vec![Vec2::new(7.0, 7.0); 10];
        let mut velocities = vec![Vec2::ZERO; 10];
        stepper.force_phase(&IndexForce, &positions, &mut velocities);
        for (i, v) in velocities.iter().enumerate() {
            assert_eq!(*v, Vec2::new(i as f64 * 0.5, 0.5));
        }
        assert!(positions.iter().all(|&p| p == Vec2::new(7.0, 7.0)));
    }

    #[test]
    fn integrate_moves_then_damps() {
        let stepper = ParallelStepper::new(2, 0.1, 0.5);
        let mut positions = vec![Vec2::new(1.0, 1.0), Vec2::ZERO];
        let mut velocities = vec![Vec2::new(10.0, -10.0), Vec2::ZERO];
        stepper.integrate(&mut positions, &mut velocities);
        assert_abs_diff_eq!(positions[0].x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(positions[0].y, 0.0, epsilon = 1e-12);
        // 10 - 10 * 0.5 * 0.1 = 9.5
        assert_abs_diff_eq!(velocities[0].x, 9.5, epsilon = 1e-12);
        assert_abs_diff_eq!(velocities[0].y, -9.5, epsilon = 1e-12);
        assert_eq!(positions[1], Vec2::ZERO);
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let positions: Vec<Vec2> = (0..37).map(|i| Vec2::new(f64::from(i), 0.0)).collect();
        let run = |workers| {
            let mut p = positions.clone();
            let mut v = vec![Vec2::ZERO; p.len()];
            ParallelStepper::new(workers, 0.1, 0.01).step(&IndexForce, &mut p, &mut v);
            (p, v)
        };
        let serial = run(1);
        for workers in [2, 5, 64] {
            assert_eq!(run(workers), serial, "workers = {workers}");
        }
    }

    #[test]
    fn chunking_covers_small_and_large_inputs() {
        let stepper = ParallelStepper::new(4, 0.1, 0.0);
        assert_eq!(stepper.chunk_len(0), 1);
        assert_eq!(stepper.chunk_len(3), 1);
        assert_eq!(stepper.chunk_len(160), 10);
        assert_eq!(stepper.chunk_len(161), 11);
    }
}
