//! Tests for utility functions

use prometheus_job_tracker::util::{app_id, matches_app_id, Clock, ClockSnapshot, ManualClock, RingBufferIndex};

#[test]
fn test_ring_buffer_index_capacity_three() {
    let mut ring = RingBufferIndex::new(3);
    let mut slots = [0u32; 3];
    for value in 1..=5 {
        let slot = ring.add();
        slots[slot] = value;
    }
    let ordered: Vec<u32> = (0..ring.size()).map(|i| slots[ring.index_of(i)]).collect();
    assert_eq!(ordered, vec![3, 4, 5]);
}

#[test]
fn test_manual_clock_snapshot() {
    let clock = ManualClock::new(42);
    assert_eq!(clock.snapshot(), ClockSnapshot::at(42));
    clock.advance(8);
    assert_eq!(clock.uptime_ms(), 50);
}

#[test]
fn test_app_id_filter() {
    assert_eq!(app_id(1_010_001), 10_001);
    assert!(matches_app_id(1_010_001, Some(10_001)));
    assert!(!matches_app_id(10_002, Some(10_001)));
}

#[test]
fn test_init_tracing_is_idempotent() {
    prometheus_job_tracker::util::init_tracing();
    prometheus_job_tracker::util::init_tracing();
    assert!(tracing::dispatcher::has_been_set());
}
