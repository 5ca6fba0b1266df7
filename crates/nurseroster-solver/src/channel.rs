//! Single-producer, single-consumer channel between a search worker thread
//! and an observer (typically a UI loop), built on a flag-guarded mutex
//! rather than an async channel — this crate runs on plain OS threads, no
//! task runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::statistics::ScoreStatistics;

/// A snapshot of solver progress, published by the worker whenever it finds
/// a new best.
pub struct Update<'a> {
    pub state: State<'a>,
    pub score: StrictHardSoftScore,
    pub statistics: ScoreStatistics,
    /// True once the worker has stopped for good; the observer should not
    /// expect further updates after consuming one of these.
    pub done: bool,
}

struct Shared<'a> {
    stop_requested: AtomicBool,
    update_pending: AtomicBool,
    slot: Mutex<Option<Update<'a>>>,
}

/// Held by the search worker. `stop_requested` is polled on every step;
/// `publish` is called whenever a new best is found or the task finishes.
pub struct WorkerHandle<'a> {
    shared: Arc<Shared<'a>>,
}

/// Held by the observer. `poll` drains the latest update without blocking
/// unless the worker happens to be mid-publish.
pub struct ObserverHandle<'a> {
    shared: Arc<Shared<'a>>,
}

/// Builds a connected worker/observer pair.
pub fn channel<'a>() -> (WorkerHandle<'a>, ObserverHandle<'a>) {
    let shared = Arc::new(Shared {
        stop_requested: AtomicBool::new(false),
        update_pending: AtomicBool::new(false),
        slot: Mutex::new(None),
    });
    (
        WorkerHandle { shared: Arc::clone(&shared) },
        ObserverHandle { shared },
    )
}

impl<'a> WorkerHandle<'a> {
    /// Polled on every search step; true once the observer has asked to
    /// stop.
    pub fn stop_requested(&self) -> bool {
        self.shared.stop_requested.load(Ordering::Acquire)
    }

    /// Locks the update slot, writes the snapshot, and marks it pending.
    /// The mutex is held only for the duration of the move — contention is
    /// rare since the observer checks the atomic flag before locking.
    pub fn publish(&self, update: Update<'a>) {
        let mut slot = self.shared.slot.lock().unwrap();
        *slot = Some(update);
        drop(slot);
        self.shared.update_pending.store(true, Ordering::Release);
    }
}

impl<'a> ObserverHandle<'a> {
    /// Requests that the worker stop at its next step boundary.
    pub fn request_stop(&self) {
        self.shared.stop_requested.store(true, Ordering::Release);
    }

    /// Non-blocking: returns `None` immediately if no update is pending, or
    /// if the worker currently holds the slot's lock.
    pub fn poll(&self) -> Option<Update<'a>> {
        if !self.shared.update_pending.load(Ordering::Acquire) {
            return None;
        }
        let mut slot = self.shared.slot.try_lock().ok()?;
        let update = slot.take();
        drop(slot);
        if update.is_some() {
            self.shared.update_pending.store(false, Ordering::Release);
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::fixture_axes;
    use nurseroster_core::Size;

    #[test]
    fn observer_sees_nothing_before_a_publish() {
        let (_worker, observer) = channel();
        assert!(observer.poll().is_none());
    }

    #[test]
    fn worker_publish_is_visible_to_observer() {
        let (shifts, employees, days, skills) = fixture_axes(1, 1, 1, 1);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let state = State::new(size, &shifts, &employees, &days, &skills);

        let (worker, observer) = channel();
        worker.publish(Update {
            state,
            score: StrictHardSoftScore::ZERO,
            statistics: ScoreStatistics::new(),
            done: false,
        });

        let update = observer.poll().expect("update should be pending");
        assert_eq!(update.score, StrictHardSoftScore::ZERO);
        assert!(observer.poll().is_none(), "slot should be drained after one poll");
    }

    #[test]
    fn observer_stop_request_is_visible_to_worker() {
        let (worker, observer) = channel();
        assert!(!worker.stop_requested());
        observer.request_stop();
        assert!(worker.stop_requested());
    }
}
