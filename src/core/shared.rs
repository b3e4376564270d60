//! Thread-safe handle around a [`JobPackageTracker`].
//!
//! Rotation must be atomic with respect to every read and write of the live
//! window, so the whole tracker sits behind one `parking_lot::Mutex`. Finer
//! grained locking would buy nothing.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::report::TrackerReport;
use crate::core::{JobEvent, JobPackageTracker, TrackedJob};
use crate::util::{Clock, SystemClock};

/// Cloneable, lock-guarded tracker handle.
#[derive(Debug)]
pub struct SharedTracker<C: Clock = SystemClock> {
    inner: Arc<Mutex<JobPackageTracker<C>>>,
}

impl<C: Clock> Clone for SharedTracker<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedTracker<C> {
    /// Wrap an existing tracker.
    pub fn new(tracker: JobPackageTracker<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Run `f` with exclusive access, for compound reads or writes that must
    /// not interleave with other callers.
    pub fn with<R>(&self, f: impl FnOnce(&mut JobPackageTracker<C>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// See [`JobPackageTracker::note_pending`].
    pub fn note_pending(&self, job: &TrackedJob) {
        self.inner.lock().note_pending(job);
    }

    /// See [`JobPackageTracker::note_nonpending`].
    pub fn note_nonpending(&self, job: &TrackedJob) {
        self.inner.lock().note_nonpending(job);
    }

    /// See [`JobPackageTracker::note_active`].
    pub fn note_active(&self, job: &TrackedJob) {
        self.inner.lock().note_active(job);
    }

    /// See [`JobPackageTracker::note_inactive`].
    pub fn note_inactive(&self, job: &TrackedJob) {
        self.inner.lock().note_inactive(job);
    }

    /// See [`JobPackageTracker::note_concurrency`].
    pub fn note_concurrency(&self, total_active: u32, fg_active: u32) {
        self.inner.lock().note_concurrency(total_active, fg_active);
    }

    /// See [`JobPackageTracker::load_factor`].
    pub fn load_factor(&self, uid: u32, package: &str) -> f32 {
        self.inner.lock().load_factor(uid, package)
    }

    /// See [`JobPackageTracker::report`].
    pub fn report(&self, filter_app_id: Option<u32>) -> TrackerReport {
        self.inner.lock().report(filter_app_id)
    }

    /// See [`JobPackageTracker::event_history`].
    pub fn event_history(&self, filter_app_id: Option<u32>) -> Vec<JobEvent> {
        self.inner.lock().event_history(filter_app_id)
    }
}

impl<C: Clock> From<JobPackageTracker<C>> for SharedTracker<C> {
    fn from(tracker: JobPackageTracker<C>) -> Self {
        Self::new(tracker)
    }
}
