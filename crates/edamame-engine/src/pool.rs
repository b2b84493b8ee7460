//! Bounded fan-out of independent tasks across scoped worker threads.
//!
//! Tasks are queued on a crossbeam channel that is filled and closed
//! before any worker starts. Each worker drains the queue until it is
//! empty; the calling thread works too, so a pool of `W` workers spawns
//! `W - 1` threads. Returning from [`WorkerPool::run`] joins every
//! worker, which makes it the phase barrier.
//!
//! Tasks may borrow from the caller's stack (e.g. disjoint `&mut`
//! slices of a velocity array) because workers are scoped.

use std::thread;

use crossbeam_channel::Receiver;

/// A fixed upper bound on concurrent workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create a pool of at most `workers` workers (at least 1).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Configured upper bound on workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `job` once per task and block until every task has finished.
    ///
    /// Uses `min(workers, task count)` workers. Returns the number of
    /// workers that actually ran tasks, including the calling thread.
    /// If a thread cannot be spawned the remaining workers absorb its
    /// share of the queue.
    ///
    /// # Panics
    ///
    /// Propagates a panic from any worker once all workers have stopped.
    pub fn run<T, I, F>(&self, tasks: I, job: F) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Send,
        F: Fn(T) + Sync,
    {
        let tasks: Vec<T> = tasks.into_iter().collect();
        let wanted = self.workers.min(tasks.len());
        if wanted <= 1 {
            tasks.into_iter().for_each(job);
            return 1;
        }

        // Filled and closed up front: workers exit on the first empty recv.
        let (task_tx, task_rx) = crossbeam_channel::bounded(tasks.len());
        for task in tasks {
            if task_tx.send(task).is_err() {
                break;
            }
        }
        drop(task_tx);

        let job = &job;
        let task_rx = &task_rx;
        thread::scope(|scope| {
            let mut running = 1;
            for i in 1..wanted {
                let spawned = thread::Builder::new()
                    .name(format!("edamame-force-{i}"))
                    .spawn_scoped(scope, move || drain(task_rx, job));
                match spawned {
                    Ok(_) => running += 1,
                    Err(e) => {
                        tracing::warn!(worker = i, error = %e, "failed to spawn worker, continuing with fewer");
                        break;
                    }
                }
            }
            drain(task_rx, job);
            running
        })
    }
}

fn drain<T, F: Fn(T)>(task_rx: &Receiver<T>, job: &F) {
    while let Ok(task) = task_rx.recv() {
        job(task);
    }
}
