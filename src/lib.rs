//! # Prometheus Job Tracker
//!
//! Per-package job activity accounting for the Prometheus scheduler.
//!
//! The scheduler reports every job transition (queued, dequeued, started,
//! stopped) for the (uid, package) the job is attributed to. The tracker keeps,
//! per package, how long it spent pending, running in the background, and
//! running on behalf of the top app, and turns that into a load factor the
//! scheduler's policy layer can use for fairness and throttling.
//!
//! ## Key Features
//!
//! - **Overlap-safe accounting**: concurrent jobs of one package are reference
//!   counted, so overlapping intervals are never double counted
//! - **Rotating windows**: time is batched into 30 minute windows with a
//!   bounded history; in-flight intervals carry across the boundary
//! - **Load factor**: busy share of the live window plus the previous one
//! - **Structured reports**: serde-serializable snapshots for external dumpers
//! - **Event log**: the last N job start/stop transitions, in order
//! - **Injected clocks**: `SystemClock` in production, `ManualClock` in tests
//!
//! ## Example
//!
//! ```
//! use prometheus_job_tracker::core::{JobPackageTracker, TrackedJob};
//! use prometheus_job_tracker::util::ManualClock;
//!
//! let clock = ManualClock::new(0);
//! let mut tracker = JobPackageTracker::with_clock(clock.clone());
//! let job = TrackedJob::new(10_010, "com.example.sync");
//!
//! tracker.note_pending(&job);
//! clock.advance(5);
//! tracker.note_nonpending(&job);
//! tracker.note_active(&job);
//! clock.advance(15);
//! tracker.note_inactive(&job);
//!
//! let entry = tracker.current().entry(10_010, "com.example.sync").unwrap();
//! assert_eq!(entry.pending.past_ms(), 5);
//! assert_eq!(entry.active.past_ms(), 15);
//! assert_eq!(tracker.load_factor(10_010, "com.example.sync"), 1.0);
//! ```
//!
//! For multi-threaded schedulers wrap the tracker in
//! [`SharedTracker`](core::SharedTracker); see `tests/` for full scenarios.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Interval accounting, rotation, load factors and the event log.
pub mod core;
/// Configuration models for the tracker.
pub mod config;
/// Builders to construct trackers from configuration.
pub mod builders;
/// Shared utilities.
pub mod util;
