//! Configuration models for the tracker.

pub mod tracker;

pub use tracker::{
    TrackerConfig, BATCH_DURATION_MS, EVENT_BUFFER_SIZE, MAX_EVENT_BUFFER_SIZE, MAX_HISTORY_LEN,
    NUM_HISTORY,
};
