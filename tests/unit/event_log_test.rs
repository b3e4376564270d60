//! Tests for the diagnostic event log

use prometheus_job_tracker::core::{EventKind, EventLog};

#[test]
fn test_event_log_overflow() {
    let mut log = EventLog::new(2);

    log.record(EventKind::StartJob, 10_001, "evt1", 1);
    log.record(EventKind::StopJob, 10_001, "evt2", 2);
    log.record(EventKind::StartJob, 10_002, "evt3", 3);

    let events: Vec<_> = log.iter().collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].tag, "evt2"); // first one overwritten
    assert_eq!(events[1].tag, "evt3");
    assert_eq!(events[1].elapsed_ms, 3);
}

#[test]
fn test_event_log_large_capacity_grows_with_use() {
    let mut log = EventLog::new(1 << 20);
    assert_eq!(log.capacity(), 1 << 20);
    assert!(log.is_empty());

    log.record(EventKind::StartJob, 10_001, "only", 7);
    assert_eq!(log.len(), 1);
    let events: Vec<_> = log.iter().collect();
    assert_eq!(events[0].tag, "only");
}

#[test]
fn test_event_kind_labels() {
    assert_eq!(EventKind::StartJob.to_string(), "START");
    assert_eq!(EventKind::StopJob.to_string(), "STOP");
}
