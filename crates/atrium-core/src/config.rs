//! Configuration types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for the status poller.
///
/// Defaults match the design contract: a 2 second poll cadence, a degraded
/// signal after 5 consecutive transient failures, and a doubling backoff
/// capped at 30 seconds while degraded.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Base interval between polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Consecutive transient failures before a degraded signal is emitted.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Interval multiplier applied while polling degraded.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: u32,
    /// Upper bound on the backed-off interval, in milliseconds.
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_backoff_multiplier() -> u32 {
    2
}

fn default_max_interval_ms() -> u64 {
    30_000
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            failure_threshold: default_failure_threshold(),
            backoff_multiplier: default_backoff_multiplier(),
            max_interval_ms: default_max_interval_ms(),
        }
    }
}

impl PollerConfig {
    /// Returns the base poll interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Returns the next interval after one more backoff step, capped at
    /// `max_interval_ms`.
    pub fn backed_off(&self, current: Duration) -> Duration {
        let next = current.saturating_mul(self.backoff_multiplier);
        next.min(Duration::from_millis(self.max_interval_ms))
    }
}
