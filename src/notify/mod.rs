//! User-facing notification channel.
//!
//! Every user-triggered success or failure in the store, search
//! coordinator, and detail session produces exactly one [`Notification`].
//! The channel is a trait so the CLI can log through `tracing` while tests
//! capture notifications in memory.

use std::sync::{Arc, Mutex};

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// A transient toast/banner message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: Severity::Info }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Sink for user-facing notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub type SharedNotifier = Arc<dyn Notifier>;

/// Production sink: routes notifications through `tracing`
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => {
                tracing::info!(title = %notification.title, "{}", notification.description);
            }
            Severity::Destructive => {
                tracing::error!(title = %notification.title, "{}", notification.description);
            }
        }
    }
}

/// In-memory sink recording every notification, used by tests
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications recorded so far, in delivery order
    pub fn snapshot(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }

    /// Drain recorded notifications
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.sent.lock().expect("notifier lock poisoned"))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().expect("notifier lock poisoned").push(notification);
    }
}
