//! Notification record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::types::id::{NotificationId, RecipientId};

use super::{NotificationCategory, NotificationPayload, Severity};

/// A persisted notification addressed to one recipient.
///
/// Records are append-only apart from the read flag; edits to title or
/// message after creation are not supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification ID.
    pub id: NotificationId,
    /// The recipient this notification is addressed to.
    pub recipient_id: RecipientId,
    /// Category from the closed taxonomy.
    pub category: NotificationCategory,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Structured contextual payload, if the category carries one.
    pub payload: Option<NotificationPayload>,
    /// Display severity.
    pub severity: Severity,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification becomes eligible for cleanup.
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Build a new unread notification created now, expiring after the
    /// given number of days.
    pub fn new(
        recipient_id: RecipientId,
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Option<NotificationPayload>,
        severity: Severity,
        expires_after_days: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NotificationId::new(),
            recipient_id,
            category,
            title: title.into(),
            message: message.into(),
            payload,
            severity,
            is_read: false,
            created_at: now,
            expires_at: now + Duration::days(expires_after_days),
        }
    }

    /// Whether the recipient has not read this notification yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Whether the notification has passed its expiration instant.
    ///
    /// Expiration is advisory; expired records stay visible until the
    /// cleanup pass removes them.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Push the expiration instant out by the given number of days.
    pub fn extend_expiration(&mut self, days: i64) {
        self.expires_at += Duration::days(days);
    }

    /// The appointment this notification references, if any.
    pub fn appointment_id(&self) -> Option<praxis_core::types::id::AppointmentId> {
        self.payload.as_ref().and_then(NotificationPayload::appointment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let notification = Notification::new(
            RecipientId::new(),
            NotificationCategory::System,
            "Maintenance",
            "Scheduled downtime tonight.",
            None,
            Severity::Info,
            30,
        );
        assert!(notification.is_unread());
        assert!(!notification.is_read);
    }

    #[test]
    fn test_expiration_window() {
        let notification = Notification::new(
            RecipientId::new(),
            NotificationCategory::System,
            "Maintenance",
            "Scheduled downtime tonight.",
            None,
            Severity::Info,
            30,
        );
        let expected = notification.created_at + Duration::days(30);
        assert_eq!(notification.expires_at, expected);
        assert!(!notification.is_expired(Utc::now()));
        assert!(notification.is_expired(notification.created_at + Duration::days(31)));
    }

    #[test]
    fn test_extend_expiration() {
        let mut notification = Notification::new(
            RecipientId::new(),
            NotificationCategory::System,
            "Maintenance",
            "Scheduled downtime tonight.",
            None,
            Severity::Info,
            30,
        );
        let original = notification.expires_at;
        notification.extend_expiration(15);
        assert_eq!(notification.expires_at, original + Duration::days(15));
    }
}
