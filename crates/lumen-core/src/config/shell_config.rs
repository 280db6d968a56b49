use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Startup and local file handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Cosmetic splash delay before the page is mounted. `0` disables it.
    pub splash_delay_ms: u64,
    /// Directory downloaded files are saved into.
    pub download_dir: PathBuf,
}

impl ShellConfig {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: defaults::DEFAULT_SPLASH_DELAY_MS,
            download_dir: PathBuf::from(defaults::DEFAULT_DOWNLOAD_DIR),
        }
    }
}
