//! Bounded log of job start/stop transitions for diagnostics.

use std::fmt;

use serde::Serialize;

use crate::util::{matches_app_id, RingBufferIndex};

/// Kind of transition recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A job started running.
    StartJob,
    /// A job stopped running.
    StopJob,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartJob => f.write_str("START"),
            Self::StopJob => f.write_str("STOP"),
        }
    }
}

/// One recorded transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobEvent {
    /// What happened.
    pub kind: EventKind,
    /// Uid the job runs for.
    pub uid: u32,
    /// Caller-supplied job tag.
    pub tag: String,
    /// Elapsed realtime when it happened.
    pub elapsed_ms: u64,
}

impl JobEvent {
    /// How long before `now` the event happened.
    pub const fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.elapsed_ms)
    }
}

/// Fixed-capacity event ring; the oldest record is overwritten once full.
#[derive(Debug, Clone)]
pub struct EventLog {
    indices: RingBufferIndex,
    slots: Vec<JobEvent>,
}

impl EventLog {
    /// Log retaining the last `capacity` events (at least one).
    ///
    /// Slots are allocated as events arrive, not up front.
    pub fn new(capacity: usize) -> Self {
        Self {
            indices: RingBufferIndex::new(capacity),
            slots: Vec::new(),
        }
    }

    /// Append an event.
    pub fn record(&mut self, kind: EventKind, uid: u32, tag: impl Into<String>, now: u64) {
        let slot = self.indices.add();
        let event = JobEvent {
            kind,
            uid,
            tag: tag.into(),
            elapsed_ms: now,
        };
        // slots fill in order until the first wrap
        if slot < self.slots.len() {
            self.slots[slot] = event;
        } else {
            self.slots.push(event);
        }
    }

    /// Retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &JobEvent> + '_ {
        (0..self.indices.size()).map(move |i| &self.slots[self.indices.index_of(i)])
    }

    /// Retained events for one app id (or all), oldest first.
    pub fn filtered(&self, filter_app_id: Option<u32>) -> Vec<JobEvent> {
        self.iter()
            .filter(|e| matches_app_id(e.uid, filter_app_id))
            .cloned()
            .collect()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.indices.size()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.indices.size() == 0
    }

    /// Maximum retained events.
    pub const fn capacity(&self) -> usize {
        self.indices.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_entries_in_order() {
        let mut log = EventLog::new(3);
        for i in 0..5u32 {
            log.record(EventKind::StartJob, 10_000 + i, format!("job-{i}"), u64::from(i));
        }
        let tags: Vec<&str> = log.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["job-2", "job-3", "job-4"]);
        assert_eq!(log.len(), 3);
        // restartable
        assert_eq!(log.iter().count(), 3);
    }

    #[test]
    fn empty_log_yields_nothing() {
        let log = EventLog::new(4);
        assert!(log.is_empty());
        assert_eq!(log.iter().next(), None);
        assert_eq!(log.capacity(), 4);
    }

    #[test]
    fn filter_by_app_id() {
        let mut log = EventLog::new(8);
        log.record(EventKind::StartJob, 10_010, "a", 1);
        log.record(EventKind::StartJob, 10_020, "b", 2);
        log.record(EventKind::StopJob, 1_010_010, "a", 3);
        let only = log.filtered(Some(10_010));
        assert_eq!(only.len(), 2);
        assert_eq!(only[1].kind, EventKind::StopJob);
        assert_eq!(only[1].age_ms(10), 7);
    }
}
