//! Notification persistence trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use praxis_core::result::AppResult;
use praxis_core::types::id::{AppointmentId, NotificationId, RecipientId};
use praxis_core::types::pagination::{PageRequest, PageResponse};

use crate::notification::Notification;

/// Persistence backend for notification records.
///
/// All recipient-scoped operations take the recipient explicitly so a
/// recipient can never read or mutate another recipient's records.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a new notification record.
    async fn insert(&self, notification: &Notification) -> AppResult<()>;

    /// Look up one notification by ID, scoped to its recipient.
    async fn find_by_id(
        &self,
        id: NotificationId,
        recipient_id: RecipientId,
    ) -> AppResult<Option<Notification>>;

    /// All unread notifications for a recipient, newest first.
    async fn list_unread(&self, recipient_id: RecipientId) -> AppResult<Vec<Notification>>;

    /// One page of a recipient's notifications, newest first.
    async fn list_page(
        &self,
        recipient_id: RecipientId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Find a reminder notification referencing the given appointment
    /// created at or after `since`. This is the idempotence probe for
    /// the scheduled reminder scan.
    async fn find_reminder_for_appointment(
        &self,
        appointment_id: AppointmentId,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Mark one notification read. Returns the updated record, or
    /// `None` when no record matches the ID and recipient.
    async fn mark_read(
        &self,
        id: NotificationId,
        recipient_id: RecipientId,
    ) -> AppResult<Option<Notification>>;

    /// Mark all of a recipient's unread notifications read. Returns the
    /// number of records updated.
    async fn mark_all_read(&self, recipient_id: RecipientId) -> AppResult<u64>;

    /// Delete one notification. Returns whether a record was removed.
    async fn delete(&self, id: NotificationId, recipient_id: RecipientId) -> AppResult<bool>;

    /// Delete all of a recipient's read notifications. Returns the
    /// number of records removed.
    async fn delete_read(&self, recipient_id: RecipientId) -> AppResult<u64>;

    /// Delete every notification created before the cutoff, across all
    /// recipients. Returns the number of records removed.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}
