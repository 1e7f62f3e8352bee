//! Transient, non-modal user notifications.
//!
//! Mode actions report outcomes here as `(message, severity, duration)`
//! triples; the UI renders whatever is currently active. The store is a pure
//! observer: nothing in the editor core reads notifications back to make
//! decisions.
//!
//! Expiry is lazy, matching the editor's synchronous input model: expired
//! entries are pruned when the store is next read, not by a timer.

use std::time::{Duration, Instant};

/// Severity of a notification, used for display styling and default duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A single transient message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    fn is_active(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) < self.duration
    }
}

/// Bounded store of active notifications, oldest first.
#[derive(Debug, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
    max_entries: usize,
}

/// How many notifications are kept at once; older ones are dropped.
const MAX_NOTIFICATIONS: usize = 5;

impl Notifications {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: MAX_NOTIFICATIONS,
        }
    }

    /// Adds a notification with an explicit severity and duration.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        self.entries.push(Notification {
            message: message.into(),
            severity,
            created_at: Instant::now(),
            duration,
        });
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    /// Adds an info notification (3 seconds).
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(3));
    }

    /// Adds a success notification (3 seconds).
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success, Duration::from_secs(3));
    }

    /// Adds a warning notification (4 seconds).
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning, Duration::from_secs(4));
    }

    /// Adds an error notification (5 seconds).
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Duration::from_secs(5));
    }

    /// Prunes expired entries and returns the active ones, oldest first.
    pub fn active(&mut self) -> &[Notification] {
        let now = Instant::now();
        self.entries.retain(|n| n.is_active(now));
        &self.entries
    }

    /// Returns the most recent active notification, if any.
    pub fn latest(&mut self) -> Option<&Notification> {
        self.active();
        self.entries.last()
    }

    /// Drops all notifications.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
