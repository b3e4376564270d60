//! Tests for error types

use prometheus_job_tracker::core::{JobState, TrackerError};

#[test]
fn test_unbalanced_end_error() {
    let err = TrackerError::UnbalancedEnd {
        uid: 10_001,
        package: "com.example".to_string(),
        state: JobState::ActiveTop,
    };
    assert_eq!(
        format!("{}", err),
        "unbalanced end: active-top not open for uid 10001 package com.example"
    );
}

#[test]
fn test_invalid_config_error() {
    let err = TrackerError::InvalidConfig("history_len must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid config: history_len must be greater than 0"
    );
}

#[test]
fn test_tracker_error_into_anyhow() {
    let err: anyhow::Error = TrackerError::InvalidConfig("bad".to_string()).into();
    assert!(err.downcast_ref::<TrackerError>().is_some());
}
