//! Structured snapshots handed to reporting layers.
//!
//! Nothing here formats text. These are plain values an external dumper can
//! render however it likes (or serialize with `serde_json`).

use serde::Serialize;

use crate::core::{JobEvent, StateCounter};
use crate::util::ClockSnapshot;

/// One state of one package as of the report time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateReport {
    /// Accounted time including any open interval up to the report time.
    pub duration_ms: u64,
    /// Distinct intervals opened in the window.
    pub count: u32,
    /// Whether the state was still open when the snapshot was taken.
    pub in_progress: bool,
}

impl StateReport {
    /// Snapshot `counter` at `now`.
    pub const fn of(counter: &StateCounter, now: u64) -> Self {
        Self {
            duration_ms: counter.duration(now),
            count: counter.count(),
            in_progress: counter.in_progress(),
        }
    }

    /// Share of `period_ms` spent in this state, in `[0, 1]` for sane inputs.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction_of(&self, period_ms: u64) -> f64 {
        if period_ms == 0 {
            return 0.0;
        }
        self.duration_ms as f64 / period_ms as f64
    }
}

/// One (uid, package) row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    /// Owning uid.
    pub uid: u32,
    /// Package name.
    pub package: String,
    /// Queued time.
    pub pending: StateReport,
    /// Background/normal running time.
    pub active: StateReport,
    /// Top-app running time.
    pub active_top: StateReport,
}

/// One window, or an aggregate of several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSetReport {
    /// Clock readings when the window opened.
    pub start: ClockSnapshot,
    /// Length of the window (frozen, summed, or elapsed so far).
    pub period_ms: u64,
    /// Rows in uid, then package order.
    pub packages: Vec<PackageReport>,
    /// Peak concurrently active jobs.
    pub max_total_active: u32,
    /// Peak concurrently active foreground jobs.
    pub max_fg_active: u32,
}

impl DataSetReport {
    /// Row for `(uid, package)` if present.
    pub fn package(&self, uid: u32, package: &str) -> Option<&PackageReport> {
        self.packages
            .iter()
            .find(|p| p.uid == uid && p.package == package)
    }
}

/// Everything a dump needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerReport {
    /// Older finalized windows, most recent first, excluding the newest one.
    pub historical: Vec<DataSetReport>,
    /// The newest finalized window merged with the live one.
    pub current: DataSetReport,
    /// Retained start/stop events, oldest first.
    pub events: Vec<JobEvent>,
    /// Elapsed realtime when the report was taken; event ages are relative to it.
    pub taken_at_elapsed_ms: u64,
}
