//! Builders to construct trackers from configuration.

use anyhow::Context;

use crate::config::TrackerConfig;
use crate::core::{AppResult, JobPackageTracker, SharedTracker, TrackerError};
use crate::util::{Clock, SystemClock};

/// Fluent construction of a [`JobPackageTracker`].
#[derive(Debug, Clone)]
pub struct TrackerBuilder<C: Clock = SystemClock> {
    config: TrackerConfig,
    clock: C,
}

impl TrackerBuilder<SystemClock> {
    /// Builder with default configuration on the process clock.
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
            clock: SystemClock::new(),
        }
    }
}

impl Default for TrackerBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TrackerBuilder<C> {
    /// Swap the time source.
    pub fn clock<D: Clock>(self, clock: D) -> TrackerBuilder<D> {
        TrackerBuilder {
            config: self.config,
            clock,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the batch length.
    #[must_use]
    pub fn batch_duration_ms(mut self, ms: u64) -> Self {
        self.config.batch_duration_ms = ms;
        self
    }

    /// Set the number of retained windows.
    #[must_use]
    pub fn history_len(mut self, len: usize) -> Self {
        self.config.history_len = len;
        self
    }

    /// Set the event log capacity.
    #[must_use]
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.config.event_buffer_size = size;
        self
    }

    /// Configuration the tracker will be built with.
    pub const fn current_config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Validate and build.
    pub fn build(self) -> Result<JobPackageTracker<C>, TrackerError> {
        JobPackageTracker::new(self.config, self.clock)
    }

    /// Validate and build a lock-guarded handle.
    pub fn build_shared(self) -> Result<SharedTracker<C>, TrackerError> {
        self.build().map(SharedTracker::new)
    }
}

/// Build a tracker on `clock` configured from `JOB_TRACKER_*` variables.
pub fn build_tracker_from_env<C: Clock>(clock: C) -> AppResult<JobPackageTracker<C>> {
    let config = TrackerConfig::from_env().context("loading tracker config from environment")?;
    tracing::debug!("building job tracker with {:?}", config);
    Ok(JobPackageTracker::new(config, clock)?)
}
