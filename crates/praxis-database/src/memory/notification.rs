//! In-memory notification store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use praxis_core::result::AppResult;
use praxis_core::types::id::{AppointmentId, NotificationId, RecipientId};
use praxis_core::types::pagination::{PageRequest, PageResponse};
use praxis_entity::notification::{Notification, NotificationCategory};
use praxis_entity::traits::NotificationStore;

/// Notification store backed by an in-memory vector.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    records: RwLock<Vec<Notification>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records, across all recipients.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        self.records.write().await.push(notification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
        recipient_id: RecipientId,
    ) -> AppResult<Option<Notification>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|n| n.id == id && n.recipient_id == recipient_id)
            .cloned())
    }

    async fn list_unread(&self, recipient_id: RecipientId) -> AppResult<Vec<Notification>> {
        let records = self.records.read().await;
        let mut unread: Vec<Notification> = records
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .cloned()
            .collect();
        unread.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(unread)
    }

    async fn list_page(
        &self,
        recipient_id: RecipientId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let records = self.records.read().await;
        let mut all: Vec<Notification> = records
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn find_reminder_for_appointment(
        &self,
        appointment_id: AppointmentId,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|n| {
                n.category == NotificationCategory::AppointmentReminder
                    && n.created_at >= since
                    && n.appointment_id() == Some(appointment_id)
            })
            .max_by_key(|n| n.created_at)
            .cloned())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        recipient_id: RecipientId,
    ) -> AppResult<Option<Notification>> {
        let mut records = self.records.write().await;
        match records
            .iter_mut()
            .find(|n| n.id == id && n.recipient_id == recipient_id)
        {
            Some(record) => {
                record.is_read = true;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn mark_all_read(&self, recipient_id: RecipientId) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let mut updated = 0;
        for record in records
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
        {
            record.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, id: NotificationId, recipient_id: RecipientId) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|n| !(n.id == id && n.recipient_id == recipient_id));
        Ok(records.len() < before)
    }

    async fn delete_read(&self, recipient_id: RecipientId) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|n| !(n.recipient_id == recipient_id && n.is_read));
        Ok((before - records.len()) as u64)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|n| n.created_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}
