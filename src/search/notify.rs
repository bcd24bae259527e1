//! Transient user-facing notifications.
//!
//! The controller fires these and never looks at what the caller does with
//! them.

use std::fmt;

/// A transient message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A find exhausted its search space.
    NotFound,
    /// A replace-all finished with this many replacements.
    Replaced(usize),
}

impl Notification {
    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotFound => "not found".to_string(),
            Self::Replaced(1) => "1 replacement made".to_string(),
            Self::Replaced(n) => format!("{} replacements made", n),
        }
    }

    /// Returns true if the message should be error-styled.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::NotFound | Self::Replaced(0))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Receives notifications from the controller.
pub trait Notifier {
    /// Shows a notification. Fire-and-forget.
    fn notify(&mut self, notification: Notification);
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(text = %notification, "search notification");
        } else {
            tracing::info!(text = %notification, "search notification");
        }
    }
}

/// Notifier that keeps every notification, for callers that render them
/// later.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all notifications, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.entries.last().copied()
    }

    /// Drains the log.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pluralize() {
        assert_eq!(Notification::NotFound.message(), "not found");
        assert_eq!(Notification::Replaced(0).message(), "0 replacements made");
        assert_eq!(Notification::Replaced(1).message(), "1 replacement made");
        assert_eq!(Notification::Replaced(7).to_string(), "7 replacements made");
    }

    #[test]
    fn test_error_styling() {
        assert!(Notification::NotFound.is_error());
        assert!(Notification::Replaced(0).is_error());
        assert!(!Notification::Replaced(2).is_error());
    }

    #[test]
    fn test_log_collects_and_drains() {
        let mut log = NotificationLog::new();
        log.notify(Notification::NotFound);
        log.notify(Notification::Replaced(3));
        assert_eq!(log.last(), Some(Notification::Replaced(3)));
        assert_eq!(log.take().len(), 2);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_log_notifier_without_subscriber() {
        let mut notifier = LogNotifier;
        notifier.notify(Notification::NotFound);
        notifier.notify(Notification::Replaced(2));
    }
}
