//! Tracker configuration.

use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Default batch length: 30 minutes.
pub const BATCH_DURATION_MS: u64 = 30 * 60 * 1000;
/// Default number of finalized windows kept.
pub const NUM_HISTORY: usize = 5;
/// Default event log capacity.
pub const EVENT_BUFFER_SIZE: usize = 100;
/// Largest accepted [`TrackerConfig::history_len`].
pub const MAX_HISTORY_LEN: usize = 1_000;
/// Largest accepted [`TrackerConfig::event_buffer_size`].
pub const MAX_EVENT_BUFFER_SIZE: usize = 1 << 20;

/// Environment variable overriding [`TrackerConfig::batch_duration_ms`].
pub const ENV_BATCH_DURATION_MS: &str = "JOB_TRACKER_BATCH_DURATION_MS";
/// Environment variable overriding [`TrackerConfig::history_len`].
pub const ENV_HISTORY_LEN: &str = "JOB_TRACKER_HISTORY_LEN";
/// Environment variable overriding [`TrackerConfig::event_buffer_size`].
pub const ENV_EVENT_BUFFER_SIZE: &str = "JOB_TRACKER_EVENT_BUFFER_SIZE";

/// Tracker tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// A window is rotated once it has been open longer than this.
    pub batch_duration_ms: u64,
    /// Finalized windows retained; the oldest is evicted beyond this.
    pub history_len: usize,
    /// Start/stop events retained by the diagnostic log.
    pub event_buffer_size: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            batch_duration_ms: BATCH_DURATION_MS,
            history_len: NUM_HISTORY,
            event_buffer_size: EVENT_BUFFER_SIZE,
        }
    }
}

impl TrackerConfig {
    /// Set the batch length.
    #[must_use]
    pub const fn with_batch_duration_ms(mut self, ms: u64) -> Self {
        self.batch_duration_ms = ms;
        self
    }

    /// Set the history length.
    #[must_use]
    pub const fn with_history_len(mut self, len: usize) -> Self {
        self.history_len = len;
        self
    }

    /// Set the event log capacity.
    #[must_use]
    pub const fn with_event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = size;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_duration_ms == 0 {
            return Err("batch_duration_ms must be greater than 0".into());
        }
        if self.history_len == 0 {
            return Err("history_len must be greater than 0".into());
        }
        if self.history_len > MAX_HISTORY_LEN {
            return Err(format!("history_len must be at most {MAX_HISTORY_LEN}"));
        }
        if self.event_buffer_size == 0 {
            return Err("event_buffer_size must be greater than 0".into());
        }
        if self.event_buffer_size > MAX_EVENT_BUFFER_SIZE {
            return Err(format!(
                "event_buffer_size must be at most {MAX_EVENT_BUFFER_SIZE}"
            ));
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by `JOB_TRACKER_*` variables, after loading a `.env`
    /// file if one is present.
    pub fn from_env() -> AppResult<Self> {
        // a missing .env is fine; the process environment still applies
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cfg = Self {
            batch_duration_ms: parse_var(&lookup, ENV_BATCH_DURATION_MS)?
                .unwrap_or(defaults.batch_duration_ms),
            history_len: parse_var(&lookup, ENV_HISTORY_LEN)?.unwrap_or(defaults.history_len),
            event_buffer_size: parse_var(&lookup, ENV_EVENT_BUFFER_SIZE)?
                .unwrap_or(defaults.event_buffer_size),
        };
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key}={raw:?} is not a valid number"))
        })
        .transpose()
}
