//! Interval accounting, rotation and the diagnostic event log.

pub mod data_set;
pub mod entry;
pub mod error;
pub mod event_log;
pub mod job;
pub mod report;
pub mod shared;
pub mod tracker;

pub use data_set::DataSet;
pub use entry::{JobState, PackageEntry, StateCounter};
pub use error::{AppResult, TrackerError};
pub use event_log::{EventKind, EventLog, JobEvent};
pub use job::{JobPriority, TrackedJob};
pub use report::{DataSetReport, PackageReport, StateReport, TrackerReport};
pub use shared::SharedTracker;
pub use tracker::JobPackageTracker;
