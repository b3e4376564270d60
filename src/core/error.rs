//! Error types for tracker operations.

use thiserror::Error;

use crate::core::JobState;

/// Errors produced by tracker components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// An `end` arrived for a state with no open interval.
    #[error("unbalanced end: {state} not open for uid {uid} package {package}")]
    UnbalancedEnd {
        /// Owning uid.
        uid: u32,
        /// Package name.
        package: String,
        /// State that was closed without being opened.
        state: JobState,
    },
    /// Configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
