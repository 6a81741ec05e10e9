//! Notification service — query and mutation facade over the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use praxis_core::error::AppError;
use praxis_core::result::AppResult;
use praxis_core::types::id::{AppointmentId, NotificationId, RecipientId};
use praxis_core::types::pagination::{PageRequest, PageResponse};
use praxis_entity::notification::Notification;
use praxis_entity::traits::NotificationStore;

/// Recipient-facing operations over stored notifications.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService").finish()
    }
}

impl NotificationService {
    /// Create a new service over the given store.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Persist a new notification record.
    pub async fn create(&self, notification: &Notification) -> AppResult<()> {
        self.store.insert(notification).await
    }

    /// All unread notifications for a recipient, newest first.
    pub async fn list_unread(&self, recipient_id: RecipientId) -> AppResult<Vec<Notification>> {
        self.store.list_unread(recipient_id).await
    }

    /// One page of a recipient's notifications, newest first.
    pub async fn list_page(
        &self,
        recipient_id: RecipientId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.store.list_page(recipient_id, page).await
    }

    /// Mark one notification read. Errors with `NotFound` when no record
    /// matches the ID and recipient.
    pub async fn mark_read(
        &self,
        id: NotificationId,
        recipient_id: RecipientId,
    ) -> AppResult<Notification> {
        self.store
            .mark_read(id, recipient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    /// Mark all of a recipient's unread notifications read. Returns the
    /// number of records updated.
    pub async fn mark_all_read(&self, recipient_id: RecipientId) -> AppResult<u64> {
        self.store.mark_all_read(recipient_id).await
    }

    /// Delete one notification. Errors with `NotFound` when no record
    /// matches.
    pub async fn delete(&self, id: NotificationId, recipient_id: RecipientId) -> AppResult<()> {
        if self.store.delete(id, recipient_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Notification {id} not found")))
        }
    }

    /// Delete all of a recipient's read notifications.
    pub async fn delete_read(&self, recipient_id: RecipientId) -> AppResult<u64> {
        self.store.delete_read(recipient_id).await
    }

    /// Delete every notification created before the cutoff.
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        self.store.delete_older_than(cutoff).await
    }

    /// Whether a reminder referencing the appointment already exists at
    /// or after `since`.
    pub async fn has_reminder_for_appointment(
        &self,
        appointment_id: AppointmentId,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        Ok(self
            .store
            .find_reminder_for_appointment(appointment_id, since)
            .await?
            .is_some())
    }
}
