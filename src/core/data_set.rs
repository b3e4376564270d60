//! Accounting windows.
//!
//! A [`DataSet`] collects per-package counters for one batch of time. The live
//! window is mutated by the tracker; once rotated out it is frozen and only
//! ever read or merged into aggregates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::report::{DataSetReport, PackageReport, StateReport};
use crate::core::{JobState, PackageEntry, TrackerError};
use crate::util::{matches_app_id, ClockSnapshot};

/// One accounting window keyed by uid, then package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSet {
    entries: BTreeMap<u32, BTreeMap<String, PackageEntry>>,
    start: ClockSnapshot,
    summed_ms: Option<u64>,
    max_total_active: u32,
    max_fg_active: u32,
}

impl DataSet {
    /// Empty live window opened at `start`.
    pub const fn new(start: ClockSnapshot) -> Self {
        Self {
            entries: BTreeMap::new(),
            start,
            summed_ms: None,
            max_total_active: 0,
            max_fg_active: 0,
        }
    }

    /// Empty window sharing `other`'s epoch. Used to seed aggregates.
    pub const fn with_epoch_of(other: &Self) -> Self {
        Self::new(other.start)
    }

    /// Clock readings taken when the window opened.
    pub const fn start(&self) -> ClockSnapshot {
        self.start
    }

    /// Entry for `(uid, package)` if it was seen in this window.
    pub fn entry(&self, uid: u32, package: &str) -> Option<&PackageEntry> {
        self.entries.get(&uid).and_then(|pkgs| pkgs.get(package))
    }

    /// Entry for `(uid, package)`, inserting an empty one if needed.
    pub fn get_or_create_entry(&mut self, uid: u32, package: &str) -> &mut PackageEntry {
        self.entries
            .entry(uid)
            .or_default()
            .entry(package.to_owned())
            .or_default()
    }

    /// Iterate `(uid, package, entry)` in uid then package order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str, &PackageEntry)> + '_ {
        self.entries
            .iter()
            .flat_map(|(uid, pkgs)| pkgs.iter().map(move |(pkg, e)| (*uid, pkg.as_str(), e)))
    }

    /// Number of distinct (uid, package) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Whether no package has been seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open an interval in `state` for the package.
    pub fn begin(&mut self, uid: u32, package: &str, state: JobState, now: u64) {
        self.get_or_create_entry(uid, package).begin(state, now);
    }

    /// Close an interval in `state` for the package.
    ///
    /// A package never seen in this window is not created.
    pub fn end(
        &mut self,
        uid: u32,
        package: &str,
        state: JobState,
        now: u64,
    ) -> Result<(), TrackerError> {
        let entry = self
            .entries
            .get_mut(&uid)
            .and_then(|pkgs| pkgs.get_mut(package));
        if entry.is_some_and(|e| e.end(state, now)) {
            Ok(())
        } else {
            Err(TrackerError::UnbalancedEnd {
                uid,
                package: package.to_owned(),
                state,
            })
        }
    }

    /// Raise the peak concurrency marks.
    pub fn note_concurrency(&mut self, total_active: u32, fg_active: u32) {
        self.max_total_active = self.max_total_active.max(total_active);
        self.max_fg_active = self.max_fg_active.max(fg_active);
    }

    /// Peak number of concurrently active jobs.
    pub const fn max_total_active(&self) -> u32 {
        self.max_total_active
    }

    /// Peak number of concurrently active foreground jobs.
    pub const fn max_fg_active(&self) -> u32 {
        self.max_fg_active
    }

    /// Frozen total for finalized windows, elapsed-so-far for live ones.
    pub const fn total_duration(&self, now: u64) -> u64 {
        match self.summed_ms {
            Some(summed) => summed,
            None => now.saturating_sub(self.start.uptime_ms),
        }
    }

    /// Whether the window's total has been frozen.
    pub const fn is_finalized(&self) -> bool {
        self.summed_ms.is_some()
    }

    /// Freeze the window's total at its duration as of `now`.
    pub const fn finalize(&mut self, now: u64) {
        self.summed_ms = Some(self.total_duration(now));
    }

    /// Close every open interval here at `now` and reopen it, at the same
    /// depth, in `successor`.
    ///
    /// Packages with nothing open are already fully accounted and are not
    /// copied forward.
    #[must_use]
    pub fn finish(&mut self, mut successor: Self, now: u64) -> Self {
        for (uid, pkgs) in &mut self.entries {
            for (pkg, entry) in pkgs.iter_mut().filter(|(_, e)| e.is_open()) {
                let next = successor.get_or_create_entry(*uid, pkg);
                for state in JobState::ALL {
                    let depth = entry.state_mut(state).close_all(now);
                    if depth > 0 {
                        next.state_mut(state).resume(depth, now);
                    }
                }
            }
        }
        successor
    }

    /// Add this window into `acc` as a snapshot taken at `now`.
    ///
    /// Open intervals contribute their elapsed time and mark the accumulated
    /// state as in progress; `self` is left as is.
    #[must_use]
    pub fn merge_into(&self, mut acc: Self, now: u64) -> Self {
        *acc.summed_ms.get_or_insert(0) += self.total_duration(now);
        for (uid, pkg, entry) in self.entries() {
            let out = acc.get_or_create_entry(uid, pkg);
            for state in JobState::ALL {
                out.state_mut(state).accumulate(entry.state(state), now);
            }
        }
        acc.note_concurrency(self.max_total_active, self.max_fg_active);
        acc
    }

    /// Structured view of the window as of `now`, optionally limited to one
    /// app id.
    pub fn report(&self, now: u64, filter_app_id: Option<u32>) -> DataSetReport {
        let packages = self
            .entries()
            .filter(|(uid, _, _)| matches_app_id(*uid, filter_app_id))
            .map(|(uid, pkg, entry)| PackageReport {
                uid,
                package: pkg.to_owned(),
                pending: StateReport::of(&entry.pending, now),
                active: StateReport::of(&entry.active, now),
                active_top: StateReport::of(&entry.active_top, now),
            })
            .collect();
        DataSetReport {
            start: self.start,
            period_ms: self.total_duration(now),
            packages,
            max_total_active: self.max_total_active,
            max_fg_active: self.max_fg_active,
        }
    }
}
