//! Time sources used by the tracker.
//!
//! The tracker never reads the system clock directly. Everything goes through
//! [`Clock`], so schedulers can hand in their own monotonic source and tests can
//! drive time by hand with [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Source of the three timelines the tracker reports against.
///
/// All values are milliseconds. `uptime_ms` drives accounting and must be
/// monotonic; `elapsed_realtime_ms` timestamps diagnostic events; `wall_clock_ms`
/// is only used to label windows for humans.
pub trait Clock: Send + Sync {
    /// Monotonic time used for all duration arithmetic.
    fn uptime_ms(&self) -> u64;
    /// Monotonic time since boot, including any suspended time.
    fn elapsed_realtime_ms(&self) -> u64;
    /// Milliseconds since the Unix epoch.
    fn wall_clock_ms(&self) -> u64;

    /// Capture all three timelines at once.
    fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            uptime_ms: self.uptime_ms(),
            elapsed_realtime_ms: self.elapsed_realtime_ms(),
            wall_clock_ms: self.wall_clock_ms(),
        }
    }
}

/// The three clock readings taken when an accounting window opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockSnapshot {
    /// Uptime at creation.
    pub uptime_ms: u64,
    /// Elapsed realtime at creation.
    pub elapsed_realtime_ms: u64,
    /// Wall clock at creation.
    pub wall_clock_ms: u64,
}

impl ClockSnapshot {
    /// Snapshot where every timeline reads `ms`.
    pub const fn at(ms: u64) -> Self {
        Self {
            uptime_ms: ms,
            elapsed_realtime_ms: ms,
            wall_clock_ms: ms,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Process-relative clock backed by [`Instant`].
///
/// Uptime and elapsed realtime both count from construction; the platform does
/// not expose a portable suspend-aware clock.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock whose monotonic timelines read zero now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn uptime_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn elapsed_realtime_ms(&self) -> u64 {
        self.uptime_ms()
    }

    fn wall_clock_ms(&self) -> u64 {
        now_ms()
    }
}

/// Hand-driven clock for tests and replay.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// move time while the tracker owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
    wall_base_ms: u64,
}

impl ManualClock {
    /// Clock reading `start_ms` on the monotonic timelines.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
            wall_base_ms: 0,
        }
    }

    /// Offset the wall clock by `wall_base_ms` from the monotonic reading.
    pub const fn with_wall_base(mut self, wall_base_ms: u64) -> Self {
        self.wall_base_ms = wall_base_ms;
        self
    }

    /// Jump to an absolute time. Moving backwards is allowed and is how clock
    /// regressions are simulated.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Release);
    }

    /// Move time forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::AcqRel);
    }

    /// Current monotonic reading.
    pub fn now(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}

impl Clock for ManualClock {
    fn uptime_ms(&self) -> u64 {
        self.now()
    }

    fn elapsed_realtime_ms(&self) -> u64 {
        self.now()
    }

    fn wall_clock_ms(&self) -> u64 {
        self.wall_base_ms.saturating_add(self.now())
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn uptime_ms(&self) -> u64 {
        (**self).uptime_ms()
    }

    fn elapsed_realtime_ms(&self) -> u64 {
        (**self).elapsed_realtime_ms()
    }

    fn wall_clock_ms(&self) -> u64 {
        (**self).wall_clock_ms()
    }
}
