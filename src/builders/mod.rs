//! Builders to construct trackers from configuration.

pub mod tracker_builder;

pub use tracker_builder::{build_tracker_from_env, TrackerBuilder};
