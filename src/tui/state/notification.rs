//! Transient notifications shown above the status bar.
//!
//! At most one notification is visible. Each carries a sequence id so an
//! expiry timer armed for an older notification cannot dismiss a newer one.

use std::time::Duration;

/// How long a notification stays visible unless dismissed.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Visual tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Confirms a completed action.
    Success,
    /// Reports a backend failure.
    Error,
}

/// A titled message with a short description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Sequence id used by expiry timers.
    pub id: u64,
    /// Tone of the message.
    pub kind: NotificationKind,
    /// Headline.
    pub title: String,
    /// Detail line.
    pub description: String,
}

/// Holds the currently visible notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    /// Creates an empty centre.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently visible notification, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Replaces the visible notification and returns its id.
    pub fn show(&mut self, kind: NotificationKind, title: &str, description: &str) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.current = Some(Notification {
            id: self.next_id,
            kind,
            title: title.to_owned(),
            description: description.to_owned(),
        });
        self.next_id
    }

    /// Hides the visible notification, returning whether one was shown.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Hides the notification with `id` if it is still the visible one.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
            return true;
        }
        false
    }
}
