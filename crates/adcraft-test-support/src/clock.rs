//! Test clock — deterministic `Clock` implementation for tests.

use adcraft_core::clock::Clock;
use chrono::{DateTime, Utc};

/// 2026-01-15T10:00:00Z, the instant shared by the workspace's tests.
const DEFAULT_INSTANT_SECS: i64 = 1_768_471_200;

/// A clock frozen at one instant, so event timestamps can be asserted exactly.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(DateTime::from_timestamp(DEFAULT_INSTANT_SECS, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
