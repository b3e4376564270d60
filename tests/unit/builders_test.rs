//! Tests for builder modules

use prometheus_job_tracker::builders::TrackerBuilder;
use prometheus_job_tracker::config::TrackerConfig;
use prometheus_job_tracker::core::{TrackedJob, TrackerError};
use prometheus_job_tracker::util::{Clock, ManualClock};

#[test]
fn test_tracker_builder_defaults() {
    let builder = TrackerBuilder::new();
    assert_eq!(builder.current_config(), &TrackerConfig::default());
    let tracker = builder.build().unwrap();
    assert!(tracker.history().is_empty());
    assert!(tracker.current().is_empty());
}

#[test]
fn test_tracker_builder_overrides() {
    let clock = ManualClock::new(500);
    let tracker = TrackerBuilder::new()
        .clock(clock.clone())
        .batch_duration_ms(1_000)
        .history_len(2)
        .event_buffer_size(4)
        .build()
        .unwrap();

    assert_eq!(tracker.config().batch_duration_ms, 1_000);
    assert_eq!(tracker.config().history_len, 2);
    assert_eq!(tracker.current().start().uptime_ms, 500);
    assert_eq!(tracker.clock().uptime_ms(), 500);
}

#[test]
fn test_tracker_builder_rejects_invalid() {
    let err = TrackerBuilder::new().history_len(0).build().unwrap_err();
    assert!(matches!(err, TrackerError::InvalidConfig(_)));
}

#[test]
fn test_tracker_builder_shared() {
    let clock = ManualClock::new(0);
    let shared = TrackerBuilder::new()
        .clock(clock.clone())
        .build_shared()
        .unwrap();
    let job = TrackedJob::new(10_001, "pkg");
    shared.note_pending(&job);
    clock.advance(10);
    shared.note_nonpending(&job);
    assert_eq!(shared.load_factor(10_001, "pkg"), 1.0);
}
