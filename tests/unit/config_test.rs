//! Tests for configuration validation

use std::collections::HashMap;

use prometheus_job_tracker::config::{
    TrackerConfig, BATCH_DURATION_MS, EVENT_BUFFER_SIZE, MAX_EVENT_BUFFER_SIZE, MAX_HISTORY_LEN,
    NUM_HISTORY,
};
use prometheus_job_tracker::core::{JobPackageTracker, TrackerError};
use prometheus_job_tracker::util::ManualClock;

#[test]
fn test_default_config() {
    let config = TrackerConfig::default();
    assert_eq!(config.batch_duration_ms, 30 * 60 * 1000);
    assert_eq!(config.batch_duration_ms, BATCH_DURATION_MS);
    assert_eq!(config.history_len, NUM_HISTORY);
    assert_eq!(config.event_buffer_size, EVENT_BUFFER_SIZE);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_invalid_batch_duration() {
    let invalid = TrackerConfig::default().with_batch_duration_ms(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_history_len() {
    let invalid = TrackerConfig::default().with_history_len(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_event_buffer() {
    let invalid = TrackerConfig::default().with_event_buffer_size(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_rejects_oversized_history_len() {
    assert!(TrackerConfig::from_json_str(r#"{"history_len": 18446744073709551615}"#).is_err());

    let at_limit = TrackerConfig::default().with_history_len(MAX_HISTORY_LEN);
    assert!(at_limit.validate().is_ok());

    let oversized = TrackerConfig::default().with_history_len(usize::MAX);
    assert!(oversized.validate().is_err());
    let err = JobPackageTracker::new(oversized, ManualClock::new(0)).unwrap_err();
    assert!(matches!(err, TrackerError::InvalidConfig(_)));
}

#[test]
fn test_config_rejects_oversized_event_buffer() {
    let at_limit = TrackerConfig::default().with_event_buffer_size(MAX_EVENT_BUFFER_SIZE);
    assert!(at_limit.validate().is_ok());
    assert!(JobPackageTracker::new(at_limit, ManualClock::new(0)).is_ok());

    let oversized = TrackerConfig::default().with_event_buffer_size(usize::MAX / 2);
    assert!(oversized.validate().is_err());
    let err = JobPackageTracker::new(oversized, ManualClock::new(0)).unwrap_err();
    assert!(matches!(err, TrackerError::InvalidConfig(_)));

    let from_env = TrackerConfig::from_lookup(|key| {
        (key == "JOB_TRACKER_EVENT_BUFFER_SIZE").then(|| (MAX_EVENT_BUFFER_SIZE + 1).to_string())
    });
    assert!(from_env.is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "batch_duration_ms": 60000,
        "history_len": 3
    }"#;

    let config = TrackerConfig::from_json_str(json).unwrap();
    assert_eq!(config.batch_duration_ms, 60_000);
    assert_eq!(config.history_len, 3);
    assert_eq!(config.event_buffer_size, EVENT_BUFFER_SIZE);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(TrackerConfig::from_json_str(r#"{"history_len": 0}"#).is_err());
    assert!(TrackerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_lookup() {
    let vars: HashMap<&str, &str> = [
        ("JOB_TRACKER_BATCH_DURATION_MS", "1000"),
        ("JOB_TRACKER_EVENT_BUFFER_SIZE", " 8 "),
    ]
    .into_iter()
    .collect();

    let config = TrackerConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap();
    assert_eq!(config.batch_duration_ms, 1_000);
    assert_eq!(config.history_len, NUM_HISTORY);
    assert_eq!(config.event_buffer_size, 8);
}

#[test]
fn test_config_from_lookup_bad_number() {
    let err = TrackerConfig::from_lookup(|key| {
        (key == "JOB_TRACKER_HISTORY_LEN").then(|| "five".to_string())
    })
    .unwrap_err();
    assert!(err.to_string().contains("JOB_TRACKER_HISTORY_LEN"));
}

#[test]
fn test_config_from_lookup_validates() {
    let result = TrackerConfig::from_lookup(|key| {
        (key == "JOB_TRACKER_BATCH_DURATION_MS").then(|| "0".to_string())
    });
    assert!(result.is_err());
}
