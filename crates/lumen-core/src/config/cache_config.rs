use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Response cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long an unused entry is retained, in seconds.
    pub retention_secs: u64,
    /// Age after which a cached value is considered stale. `0` means every
    /// read triggers a fetch.
    pub stale_after_secs: u64,
    /// Retry failed fetches automatically.
    pub retry_on_failure: bool,
}

impl CacheConfig {
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            retention_secs: defaults::DEFAULT_CACHE_RETENTION_SECS,
            stale_after_secs: defaults::DEFAULT_STALE_AFTER_SECS,
            retry_on_failure: defaults::DEFAULT_RETRY_ON_FAILURE,
        }
    }
}
