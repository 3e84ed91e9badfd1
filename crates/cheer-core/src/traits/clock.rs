//! Wall-clock source for record timestamps

use chrono::{DateTime, SubsecRound, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
///
/// Readings are truncated to whole milliseconds, the precision records are
/// persisted with, so a freshly written reaction equals its stored copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}
