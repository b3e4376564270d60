//! Per-package interval counters.
//!
//! Each tracked state keeps a nesting count and a single start time instead of
//! a list of intervals. Overlapping jobs of the same package raise the nesting
//! count; time is only banked when the last one closes, so concurrent jobs are
//! never double counted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scheduling state whose time is accounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Queued and waiting to run.
    Pending,
    /// Running at background or normal priority.
    Active,
    /// Running at top-app priority.
    ActiveTop,
}

impl JobState {
    /// Every state, in report order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Active, Self::ActiveTop];

    /// Short label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::ActiveTop => "active-top",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference-counted interval accumulator for one state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounter {
    past_ms: u64,
    start_ms: u64,
    nesting: u32,
    count: u32,
    had_open: bool,
}

impl StateCounter {
    /// Open an interval. Only the outermost open starts the clock.
    pub fn begin(&mut self, now: u64) {
        if self.nesting == 0 {
            self.start_ms = now;
            self.count += 1;
        }
        self.nesting += 1;
    }

    /// Close an interval, banking time when the outermost one closes.
    ///
    /// Returns `false` and leaves the counter untouched when nothing is open.
    #[must_use]
    pub fn end(&mut self, now: u64) -> bool {
        match self.nesting {
            0 => false,
            1 => {
                self.past_ms += now.saturating_sub(self.start_ms);
                self.nesting = 0;
                true
            }
            _ => {
                self.nesting -= 1;
                true
            }
        }
    }

    /// Closed time plus the open interval as if it ended at `now`.
    pub const fn duration(&self, now: u64) -> u64 {
        if self.nesting > 0 {
            self.past_ms + now.saturating_sub(self.start_ms)
        } else {
            self.past_ms
        }
    }

    /// Close every open interval at `now` regardless of depth and return the
    /// depth that was open.
    pub(crate) const fn close_all(&mut self, now: u64) -> u32 {
        let depth = self.nesting;
        if depth > 0 {
            self.past_ms += now.saturating_sub(self.start_ms);
            self.nesting = 0;
        }
        depth
    }

    /// Resume `depth` intervals carried over from an earlier window.
    pub(crate) const fn resume(&mut self, depth: u32, now: u64) {
        self.start_ms = now;
        self.nesting = depth;
    }

    /// Fold `other` into this counter as a point-in-time snapshot at `now`.
    pub(crate) const fn accumulate(&mut self, other: &Self, now: u64) {
        self.past_ms += other.past_ms;
        self.count += other.count;
        if other.nesting > 0 {
            self.past_ms += now.saturating_sub(other.start_ms);
            self.had_open = true;
        }
    }

    /// Time banked by closed intervals.
    pub const fn past_ms(&self) -> u64 {
        self.past_ms
    }

    /// Start of the current open interval; stale when not open.
    pub const fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Number of overlapping open intervals.
    pub const fn nesting(&self) -> u32 {
        self.nesting
    }

    /// Distinct intervals opened in this window.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Whether a merged source was still open when it was merged.
    pub const fn had_open(&self) -> bool {
        self.had_open
    }

    /// Whether any interval is open right now.
    pub const fn is_open(&self) -> bool {
        self.nesting > 0
    }

    /// Open now, or open in a source at the time it was merged.
    pub const fn in_progress(&self) -> bool {
        self.nesting > 0 || self.had_open
    }
}

/// Accounting for one (uid, package) inside one window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Queued time.
    pub pending: StateCounter,
    /// Background/normal running time.
    pub active: StateCounter,
    /// Top-app running time.
    pub active_top: StateCounter,
}

impl PackageEntry {
    /// Counter for `state`.
    pub const fn state(&self, state: JobState) -> &StateCounter {
        match state {
            JobState::Pending => &self.pending,
            JobState::Active => &self.active,
            JobState::ActiveTop => &self.active_top,
        }
    }

    /// Mutable counter for `state`.
    pub const fn state_mut(&mut self, state: JobState) -> &mut StateCounter {
        match state {
            JobState::Pending => &mut self.pending,
            JobState::Active => &mut self.active,
            JobState::ActiveTop => &mut self.active_top,
        }
    }

    /// Open an interval in `state`.
    pub fn begin(&mut self, state: JobState, now: u64) {
        self.state_mut(state).begin(now);
    }

    /// Close an interval in `state`; `false` on underflow.
    #[must_use]
    pub fn end(&mut self, state: JobState, now: u64) -> bool {
        self.state_mut(state).end(now)
    }

    /// Accounted time in `state` as of `now`.
    pub const fn duration(&self, state: JobState, now: u64) -> u64 {
        self.state(state).duration(now)
    }

    /// Whether any state has an open interval.
    pub const fn is_open(&self) -> bool {
        self.pending.is_open() || self.active.is_open() || self.active_top.is_open()
    }
}
