//! Ingestion notices.
//!
//! Non-fatal events encountered while reading (a record dropped by the layer
//! filter, a construction path discarded, a file that ends in the middle of a
//! record) are collected as `Notification` items instead of being dropped
//! silently or turned into hard errors.
//!
//! After reading, the caller can inspect the reader's `notifications()`.

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A record was rejected by the layer filter.
    Rejected,
    /// A finished path was thrown away (construction line, or a path that
    /// was never closed by a trigger).
    Discarded,
    /// The stream ended while a record was still being read.
    Truncated,
    /// Anything else worth knowing about (e.g. a vertex with no coordinates).
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "Rejected"),
            Self::Discarded => write!(f, "Discarded"),
            Self::Truncated => write!(f, "Truncated"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single notification produced during reading.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The category.
    pub notification_type: NotificationType,
    /// A human-readable description.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications during a read.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Rejected, "POINT on layer 'HIDDEN'");
        c.notify(NotificationType::Truncated, "POLYLINE cut off");
        c.notify(NotificationType::Rejected, "LINE on layer 'HIDDEN'");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::Rejected).len(), 2);
        assert!(c.has_type(NotificationType::Truncated));
        assert!(!c.has_type(NotificationType::Discarded));
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::Discarded, "construction path with 3 vertices");
        assert_eq!(format!("{}", n), "[Discarded] construction path with 3 vertices");
    }
}
