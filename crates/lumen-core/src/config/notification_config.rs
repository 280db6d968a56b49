use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Top,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAnchor {
    Left,
    #[default]
    Center,
    Right,
}

/// Transient notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Maximum notifications shown at once; older ones are dismissed first.
    pub max_visible: usize,
    /// Lifetime of a notification in milliseconds.
    pub auto_hide_ms: u64,
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl NotificationConfig {
    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.auto_hide_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_visible: defaults::DEFAULT_MAX_VISIBLE_NOTIFICATIONS,
            auto_hide_ms: defaults::DEFAULT_NOTIFICATION_AUTO_HIDE_MS,
            vertical: VerticalAnchor::Bottom,
            horizontal: HorizontalAnchor::Center,
        }
    }
}
