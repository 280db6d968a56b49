//! Transient notifications: a bounded queue with auto-hide.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use lumen_core::config::{HorizontalAnchor, NotificationConfig, VerticalAnchor};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Default)]
struct Queue {
    items: VecDeque<Notification>,
    next_id: u64,
}

/// At most `max_visible` notifications are kept; pushing past the cap drops
/// the oldest. Each one hides itself `auto_hide_ms` after it was pushed.
pub struct NotificationCenter {
    config: NotificationConfig,
    queue: Mutex<Queue>,
}

impl NotificationCenter {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            queue: Mutex::new(Queue::default()),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationKind::Info, message)
    }

    pub fn push(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        tracing::debug!(kind = %kind, message = %message, "notification");
        let mut queue = self.lock();
        queue.next_id += 1;
        let id = queue.next_id;
        queue.items.push_back(Notification {
            id,
            kind,
            message,
            created_at: Instant::now(),
        });
        while queue.items.len() > self.config.max_visible {
            queue.items.pop_front();
        }
        id
    }

    /// Notifications still on screen, oldest first. Expired ones are dropped.
    pub fn visible(&self) -> Vec<Notification> {
        let auto_hide = self.config.auto_hide();
        let mut queue = self.lock();
        queue
            .items
            .retain(|n| n.created_at.elapsed() < auto_hide);
        queue.items.iter().cloned().collect()
    }

    pub fn dismiss(&self, id: u64) -> bool {
        let mut queue = self.lock();
        let before = queue.items.len();
        queue.items.retain(|n| n.id != id);
        queue.items.len() != before
    }

    pub fn clear(&self) {
        self.lock().items.clear();
    }

    pub fn placement(&self) -> (VerticalAnchor, HorizontalAnchor) {
        (self.config.vertical, self.config.horizontal)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_removes_only_that_notification() {
        let center = NotificationCenter::new(NotificationConfig::default());
        let first = center.info("one");
        center.info("two");
        assert!(center.dismiss(first));
        assert!(!center.dismiss(first));
        let visible = center.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "two");
    }

    #[test]
    fn default_placement_is_bottom_center() {
        let center = NotificationCenter::new(NotificationConfig::default());
        assert_eq!(
            center.placement(),
            (VerticalAnchor::Bottom, HorizontalAnchor::Center)
        );
    }
}
