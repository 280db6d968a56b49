use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// File-state polling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between background file checks in milliseconds.
    pub interval_ms: u64,
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: defaults::DEFAULT_POLL_INTERVAL_MS,
        }
    }
}
