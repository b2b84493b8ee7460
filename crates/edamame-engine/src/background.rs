//! Stepping a session on a dedicated thread while the caller polls.
//!
//! ```text
//! Caller thread                      edamame-layout thread
//!     |                                   |
//!     |--spawn(session)------------------>| session.step()
//!     |                                   | publish Arc<PositionSnapshot>
//!     |<--latest() / progress()-----------| progress += 1
//!     |--cancel()------------------------>| flag observed before next step
//!     |--join()-------------------------->| returns LayoutSession
//! ```
//!
//! Snapshots are owned copies published after complete steps, so a
//! reader never sees positions from the middle of a step.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::error::ConfigError;
use crate::session::{CancelToken, LayoutSession};
use crate::snapshot::PositionSnapshot;

/// Latest published snapshot, swapped whole under a short lock.
#[derive(Debug)]
struct SnapshotSlot {
    latest: Mutex<Arc<PositionSnapshot>>,
}

// Compile-time assertion: the slot is shared across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SnapshotSlot>();
};

impl SnapshotSlot {
    fn new(initial: PositionSnapshot) -> Self {
        Self {
            latest: Mutex::new(Arc::new(initial)),
        }
    }

    fn publish(&self, snapshot: PositionSnapshot) {
        let snapshot = Arc::new(snapshot);
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    fn latest(&self) -> Arc<PositionSnapshot> {
        let guard = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }
}

/// A [`LayoutSession`] running on its own thread.
///
/// Dropping the handle without [`join()`](Self::join) cancels the run
/// and waits for the thread to stop.
pub struct BackgroundLayout {
    slot: Arc<SnapshotSlot>,
    progress: Arc<AtomicU64>,
    done: Arc<AtomicBool>,
    cancel: CancelToken,
    handle: Option<JoinHandle<LayoutSession>>,
}

impl BackgroundLayout {
    /// Start `session` and step it on a thread named `edamame-layout`.
    ///
    /// The run is started on the calling thread, so a [`cancel()`](Self::cancel)
    /// issued right after `spawn` is always observed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ThreadSpawnFailed`] if the OS refuses the thread.
    pub fn spawn(mut session: LayoutSession) -> Result<Self, ConfigError> {
        session.start();
        let slot = Arc::new(SnapshotSlot::new(session.snapshot()));
        let progress = Arc::new(AtomicU64::new(session.steps_completed()));
        let done = Arc::new(AtomicBool::new(false));
        let cancel = session.cancel_token();

        let thread_slot = Arc::clone(&slot);
        let thread_progress = Arc::clone(&progress);
        let thread_done = Arc::clone(&done);
        let handle = thread::Builder::new()
            .name("edamame-layout".into())
            .spawn(move || {
                while session.step() {
                    thread_slot.publish(session.snapshot());
                    thread_progress.store(session.steps_completed(), Ordering::Release);
                }
                // The final step returns false but still moved the nodes.
                thread_slot.publish(session.snapshot());
                thread_progress.store(session.steps_completed(), Ordering::Release);
                thread_done.store(true, Ordering::Release);
                session
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("edamame-layout: {e}"),
            })?;

        Ok(Self {
            slot,
            progress,
            done,
            cancel,
            handle: Some(handle),
        })
    }

    /// Most recent snapshot. Never blocks on a step in progress.
    pub fn latest(&self) -> Arc<PositionSnapshot> {
        self.slot.latest()
    }

    /// Steps completed so far.
    pub fn progress(&self) -> u64 {
        self.progress.load(Ordering::Acquire)
    }

    /// True once the thread has stopped stepping.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Request cancellation; the current step still completes.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the run to end and take the session back.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the layout thread.
    pub fn join(mut self) -> LayoutSession {
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(session)) => session,
            Some(Err(payload)) => std::panic::resume_unwind(payload),
            None => unreachable!("handle is only taken by join or drop"),
        }
    }
}

impl Drop for BackgroundLayout {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel.cancel();
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for BackgroundLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundLayout")
            .field("progress", &self.progress())
            .field("done", &self.is_done())
            .field("joined", &self.handle.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::session::SessionState;
    use edamame_test_utils::path_graph;
    use std::time::Duration;

    fn session(max_iterations: Option<u64>) -> LayoutSession {
        let cfg = LayoutConfig {
            max_workers: 2,
            max_iterations,
            ..LayoutConfig::default()
        };
        LayoutSession::new(path_graph(8, 2.0), cfg).unwrap()
    }

    #[test]
    fn bounded_run_completes_and_returns_session() {
        let bg = BackgroundLayout::spawn(session(Some(20))).unwrap();
        let session = bg.join();
        assert_eq!(session.state(), SessionState::Finished);
        assert_eq!(session.steps_completed(), 20);
    }

    #[test]
    fn latest_matches_final_positions() {
        let bg = BackgroundLayout::spawn(session(Some(10))).unwrap();
        while !bg.is_done() {
            thread::sleep(Duration::from_millis(1));
        }
        let snap = bg.latest();
        assert_eq!(bg.progress(), 10);
        let session = bg.join();
        assert_eq!(snap.step, 10);
        assert_eq!(*snap, session.snapshot());
    }

    #[test]
    fn cancel_stops_unbounded_run() {
        let bg = BackgroundLayout::spawn(session(None)).unwrap();
        while bg.progress() < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        bg.cancel();
        let session = bg.join();
        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(session.steps_completed() >= 3);
    }

    #[test]
    fn cancel_immediately_after_spawn_is_observed() {
        let bg = BackgroundLayout::spawn(session(None)).unwrap();
        bg.cancel();
        let session = bg.join();
        assert_eq!(session.state(), SessionState::Cancelled);
    }

    #[test]
    fn drop_cancels_and_joins() {
        let bg = BackgroundLayout::spawn(session(None)).unwrap();
        drop(bg);
    }

    #[test]
    fn runs_on_named_thread() {
        let handle = BackgroundLayout::spawn(session(Some(1))).unwrap();
        let name = handle
            .handle
            .as_ref()
            .and_then(|h| h.thread().name().map(str::to_owned));
        assert_eq!(name.as_deref(), Some("edamame-layout"));
        handle.join();
    }
}
