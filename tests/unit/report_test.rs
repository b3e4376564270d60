//! Tests for structured reports

use prometheus_job_tracker::config::TrackerConfig;
use prometheus_job_tracker::core::{JobPackageTracker, JobPriority, TrackedJob};
use prometheus_job_tracker::util::ManualClock;

#[test]
fn test_report_marks_in_progress_and_filters() {
    let clock = ManualClock::new(0).with_wall_base(1_700_000_000_000);
    let mut tracker = JobPackageTracker::with_clock(clock.clone());
    let fg = TrackedJob::new(10_050, "app.fg").with_priority(JobPriority::TopApp);
    let bg = TrackedJob::new(10_060, "app.bg");

    tracker.note_active(&fg);
    tracker.note_pending(&bg);
    clock.advance(1_000);
    tracker.note_nonpending(&bg);
    tracker.note_concurrency(2, 1);

    let report = tracker.report(Some(10_050));
    assert!(report.historical.is_empty());
    assert_eq!(report.current.packages.len(), 1);
    let row = report.current.package(10_050, "app.fg").unwrap();
    assert_eq!(row.active_top.duration_ms, 1_000);
    assert_eq!(row.active_top.count, 1);
    assert!(row.active_top.in_progress);
    assert!(!row.pending.in_progress);
    assert_eq!(report.current.period_ms, 1_000);
    assert_eq!(report.current.start.wall_clock_ms, 1_700_000_000_000);
    assert_eq!(report.current.max_total_active, 2);
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.taken_at_elapsed_ms, 1_000);
    assert!((row.active_top.fraction_of(report.current.period_ms) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_report_serializes_to_json() {
    let clock = ManualClock::new(0);
    let mut tracker =
        JobPackageTracker::new(TrackerConfig::default().with_batch_duration_ms(10), clock.clone())
            .unwrap();
    let job = TrackedJob::new(10_001, "pkg");
    tracker.note_active(&job);
    clock.advance(25);
    tracker.note_inactive(&job);

    let value = serde_json::to_value(tracker.report(None)).unwrap();
    assert_eq!(value["current"]["packages"][0]["package"], "pkg");
    assert_eq!(value["current"]["packages"][0]["active"]["duration_ms"], 25);
    assert_eq!(value["events"][0]["kind"], "start_job");
    assert_eq!(value["events"][1]["kind"], "stop_job");
}
