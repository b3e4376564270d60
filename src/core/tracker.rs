//! Per-package job activity tracker.
//!
//! The scheduler reports each job's lifecycle here (queued, started, stopped)
//! and asks back for a load factor when deciding what to run next. Time is
//! accounted into a live [`DataSet`] that is rotated into a bounded history
//! once it has been open longer than the configured batch duration.
//!
//! The tracker takes `&mut self` everywhere and does no locking of its own; use
//! [`SharedTracker`](crate::core::SharedTracker) when several threads report in.

use std::collections::VecDeque;

use crate::config::TrackerConfig;
use crate::core::report::TrackerReport;
use crate::core::{DataSet, EventKind, EventLog, JobEvent, JobState, PackageEntry, TrackedJob, TrackerError};
use crate::util::{Clock, ClockSnapshot, SystemClock};

/// Accounting engine: one live window, a ring of finalized ones, and a
/// diagnostic event log.
#[derive(Debug)]
pub struct JobPackageTracker<C: Clock = SystemClock> {
    config: TrackerConfig,
    clock: C,
    current: DataSet,
    /// Most recent first.
    history: VecDeque<DataSet>,
    events: EventLog,
    contract_violations: u64,
}

impl JobPackageTracker<SystemClock> {
    /// Tracker with default configuration on the process clock.
    pub fn with_defaults() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl<C: Clock> JobPackageTracker<C> {
    /// Create a tracker after validating `config`.
    pub fn new(config: TrackerConfig, clock: C) -> Result<Self, TrackerError> {
        config.validate().map_err(TrackerError::InvalidConfig)?;
        Ok(Self::build(config, clock))
    }

    /// Tracker with default configuration.
    pub fn with_clock(clock: C) -> Self {
        Self::build(TrackerConfig::default(), clock)
    }

    fn build(config: TrackerConfig, clock: C) -> Self {
        let current = DataSet::new(clock.snapshot());
        Self {
            history: VecDeque::new(),
            events: EventLog::new(config.event_buffer_size),
            current,
            clock,
            config,
            contract_violations: 0,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Injected clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Live window.
    pub const fn current(&self) -> &DataSet {
        &self.current
    }

    /// Finalized windows, most recent first.
    pub const fn history(&self) -> &VecDeque<DataSet> {
        &self.history
    }

    /// Number of `end` calls that had no matching `begin`.
    pub const fn contract_violations(&self) -> u64 {
        self.contract_violations
    }

    /// Rotate the live window if it has outgrown the batch duration.
    ///
    /// Open intervals are closed in the outgoing window and reopened at `now`
    /// in the new one, so totals across the boundary are unchanged.
    pub fn maybe_rotate(&mut self, now: u64) -> bool {
        let total = self.current.total_duration(now);
        if total <= self.config.batch_duration_ms {
            return false;
        }
        let fresh = DataSet::new(ClockSnapshot {
            uptime_ms: now,
            ..self.clock.snapshot()
        });
        let next = self.current.finish(fresh, now);
        self.current.finalize(now);
        let last = std::mem::replace(&mut self.current, next);
        self.history.push_front(last);
        self.history.truncate(self.config.history_len);
        tracing::debug!(
            "rotated job stats window after {} ms, carrying {} packages",
            total,
            self.current.len()
        );
        true
    }

    /// A job for `job`'s package entered the queue.
    pub fn note_pending(&mut self, job: &TrackedJob) {
        let now = self.clock.uptime_ms();
        self.maybe_rotate(now);
        self.current.begin(job.uid, &job.package, JobState::Pending, now);
    }

    /// A job for `job`'s package left the queue.
    pub fn note_nonpending(&mut self, job: &TrackedJob) {
        let now = self.clock.uptime_ms();
        self.end_state(job, JobState::Pending, now);
        self.maybe_rotate(now);
    }

    /// A job started running.
    pub fn note_active(&mut self, job: &TrackedJob) {
        let now = self.clock.uptime_ms();
        self.maybe_rotate(now);
        self.current
            .begin(job.uid, &job.package, job.priority.active_state(), now);
        self.events.record(
            EventKind::StartJob,
            job.uid,
            job.tag.as_str(),
            self.clock.elapsed_realtime_ms(),
        );
    }

    /// A job stopped running. `job.priority` must match what was passed to
    /// [`note_active`](Self::note_active).
    pub fn note_inactive(&mut self, job: &TrackedJob) {
        let now = self.clock.uptime_ms();
        self.end_state(job, job.priority.active_state(), now);
        self.maybe_rotate(now);
        self.events.record(
            EventKind::StopJob,
            job.uid,
            job.tag.as_str(),
            self.clock.elapsed_realtime_ms(),
        );
    }

    /// Record how many jobs are running right now.
    pub fn note_concurrency(&mut self, total_active: u32, fg_active: u32) {
        self.current.note_concurrency(total_active, fg_active);
    }

    fn end_state(&mut self, job: &TrackedJob, state: JobState, now: u64) {
        if let Err(err) = self.current.end(job.uid, &job.package, state, now) {
            self.contract_violations += 1;
            tracing::warn!("ignoring {}", err);
        }
    }

    /// Share of recent time the package spent pending or running in the
    /// background, rotating first if the live window is due.
    pub fn load_factor(&mut self, uid: u32, package: &str) -> f32 {
        let now = self.clock.uptime_ms();
        self.maybe_rotate(now);
        self.load_factor_at(uid, package, now)
    }

    /// Load factor over the live window and the most recent finalized one, as
    /// of `now`.
    ///
    /// Top-app running time is not counted. The result is 0 for unknown
    /// packages and is clamped to `[0, 1]`, since pending and running time may
    /// overlap.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn load_factor_at(&self, uid: u32, package: &str, now: u64) -> f32 {
        let cur = self.current.entry(uid, package);
        let last = self
            .history
            .front()
            .and_then(|set| set.entry(uid, package).map(|e| (set, e)));
        if cur.is_none() && last.is_none() {
            return 0.0;
        }

        let mut busy = cur.map_or(0, |e| busy_time(e, now));
        let mut period = self.current.total_duration(now);
        if let Some((set, entry)) = last {
            busy += busy_time(entry, now);
            period += set.total_duration(now);
        }
        if period == 0 {
            return 0.0;
        }
        (busy as f64 / period as f64).clamp(0.0, 1.0) as f32
    }

    /// One window spanning every retained finalized window plus the live one.
    pub fn aggregate(&self, now: u64) -> DataSet {
        let seed = DataSet::with_epoch_of(self.history.back().unwrap_or(&self.current));
        let acc = self
            .history
            .iter()
            .rev()
            .fold(seed, |acc, set| set.merge_into(acc, now));
        self.current.merge_into(acc, now)
    }

    /// Structured dump, rotating first if the live window is due.
    pub fn report(&mut self, filter_app_id: Option<u32>) -> TrackerReport {
        let now = self.clock.uptime_ms();
        self.maybe_rotate(now);
        self.report_at(now, self.clock.elapsed_realtime_ms(), filter_app_id)
    }

    /// Structured dump as of the given uptime and elapsed realtime.
    ///
    /// Windows older than the newest finalized one are reported on their own;
    /// the newest finalized window is merged with the live one into `current`.
    pub fn report_at(&self, now: u64, now_elapsed: u64, filter_app_id: Option<u32>) -> TrackerReport {
        let total = match self.history.front() {
            Some(last) => last.merge_into(DataSet::with_epoch_of(last), now),
            None => DataSet::with_epoch_of(&self.current),
        };
        let total = self.current.merge_into(total, now);
        TrackerReport {
            historical: self
                .history
                .iter()
                .skip(1)
                .map(|set| set.report(now, filter_app_id))
                .collect(),
            current: total.report(now, filter_app_id),
            events: self.event_history(filter_app_id),
            taken_at_elapsed_ms: now_elapsed,
        }
    }

    /// Retained start/stop events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &JobEvent> + '_ {
        self.events.iter()
    }

    /// Retained events for one app id (or all), oldest first.
    pub fn event_history(&self, filter_app_id: Option<u32>) -> Vec<JobEvent> {
        self.events.filtered(filter_app_id)
    }
}

fn busy_time(entry: &PackageEntry, now: u64) -> u64 {
    entry.duration(JobState::Active, now) + entry.duration(JobState::Pending, now)
}
