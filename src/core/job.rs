//! Job identity as handed in by the scheduler.

use serde::{Deserialize, Serialize};

use crate::core::JobState;

/// Priority the scheduler last evaluated for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    /// Lowest priority.
    Min,
    /// Below default.
    Low,
    /// Default.
    #[default]
    Default,
    /// Above default.
    High,
    /// Highest non-foreground priority.
    Max,
    /// Job runs on behalf of the top (foreground) app.
    TopApp,
}

impl JobPriority {
    /// Whether running time is accounted as foreground.
    pub const fn is_top_app(self) -> bool {
        matches!(self, Self::TopApp)
    }

    /// State running time is accounted under.
    pub const fn active_state(self) -> JobState {
        if self.is_top_app() {
            JobState::ActiveTop
        } else {
            JobState::Active
        }
    }
}

/// The parts of a job the tracker needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedJob {
    /// Uid the job is attributed to.
    pub uid: u32,
    /// Package the job is attributed to.
    pub package: String,
    /// Tag recorded in the event log.
    pub tag: String,
    /// Priority the job was last evaluated at.
    pub priority: JobPriority,
}

impl TrackedJob {
    /// Job at default priority tagged with its package name.
    pub fn new(uid: u32, package: impl Into<String>) -> Self {
        let package = package.into();
        Self {
            uid,
            tag: package.clone(),
            package,
            priority: JobPriority::Default,
        }
    }

    /// Override the event-log tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Override the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: JobPriority) -> Self {
        self.priority = priority;
        self
    }
}
