//! Notification dispatcher — persists a record, then pushes it to the
//! recipient's live connection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use praxis_core::config::NotificationsConfig;
use praxis_core::error::AppError;
use praxis_core::result::AppResult;
use praxis_core::types::id::RecipientId;
use praxis_entity::notification::{
    Notification, NotificationCategory, NotificationPayload, Severity,
};
use praxis_realtime::message::Envelope;
use praxis_realtime::registry::ConnectionRegistry;

use crate::service::NotificationService;

/// Input for creating one notification.
#[derive(Debug, Clone)]
pub struct NotificationInput {
    /// Recipient to address.
    pub recipient_id: RecipientId,
    /// Category from the closed taxonomy.
    pub category: NotificationCategory,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Structured contextual payload.
    pub payload: Option<NotificationPayload>,
    /// Display severity.
    pub severity: Severity,
    /// Override for the expiration instant; defaults to the configured
    /// retention window when unset.
    pub expires_at: Option<DateTime<Utc>>,
}

impl NotificationInput {
    /// Plain input with default severity and expiration.
    pub fn new(
        recipient_id: RecipientId,
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            category,
            title: title.into(),
            message: message.into(),
            payload: None,
            severity: Severity::default(),
            expires_at: None,
        }
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: NotificationPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Notification title must not be empty"));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::validation(
                "Notification message must not be empty",
            ));
        }
        Ok(())
    }
}

/// Creates notification records and delivers them in real time.
///
/// Persistence is the source of truth: the record is inserted first, and
/// only then pushed. A failed insert aborts the operation; a failed push
/// is logged and swallowed, since the recipient will see the record on
/// their next fetch.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    service: NotificationService,
    registry: Arc<ConnectionRegistry>,
    config: NotificationsConfig,
}

impl NotificationDispatcher {
    /// Create a new dispatcher.
    pub fn new(
        service: NotificationService,
        registry: Arc<ConnectionRegistry>,
        config: NotificationsConfig,
    ) -> Self {
        Self {
            service,
            registry,
            config,
        }
    }

    /// The underlying service, for read and mutation paths that bypass
    /// dispatch.
    pub fn service(&self) -> &NotificationService {
        &self.service
    }

    /// Create a notification record and push it to the recipient if they
    /// are online.
    pub async fn create_and_send(&self, input: NotificationInput) -> AppResult<Notification> {
        input.validate()?;

        let mut notification = Notification::new(
            input.recipient_id,
            input.category,
            input.title,
            input.message,
            input.payload,
            input.severity,
            self.config.expires_after_days,
        );
        if let Some(expires_at) = input.expires_at {
            notification.expires_at = expires_at;
        }

        self.service.create(&notification).await?;
        debug!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            category = %notification.category,
            "Notification created"
        );

        self.push(&notification);
        Ok(notification)
    }

    /// Best-effort real-time push. Never fails the caller.
    fn push(&self, notification: &Notification) {
        match Envelope::notification(notification) {
            Ok(envelope) => {
                let delivered = self
                    .registry
                    .push_to_recipient(notification.recipient_id, &envelope);
                if !delivered {
                    debug!(
                        notification_id = %notification.id,
                        recipient_id = %notification.recipient_id,
                        "Recipient offline, skipping push"
                    );
                }
            }
            Err(e) => {
                warn!(
                    notification_id = %notification.id,
                    error = %e,
                    "Failed to serialize notification for push"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use praxis_core::error::ErrorKind;
    use praxis_core::types::id::{AppointmentId, NotificationId};
    use praxis_core::types::pagination::{PageRequest, PageResponse};
    use praxis_database::memory::MemoryNotificationStore;
    use praxis_entity::traits::NotificationStore;

    fn dispatcher_with(
        store: Arc<dyn NotificationStore>,
        registry: Arc<ConnectionRegistry>,
    ) -> NotificationDispatcher {
        NotificationDispatcher::new(
            NotificationService::new(store),
            registry,
            NotificationsConfig::default(),
        )
    }

    fn input(recipient_id: RecipientId) -> NotificationInput {
        NotificationInput::new(
            recipient_id,
            NotificationCategory::System,
            "Notice",
            "Something happened.",
        )
    }

    /// Store whose inserts always fail, for exercising the persist-first
    /// contract.
    struct FailingStore;

    #[async_trait]
    impl NotificationStore for FailingStore {
        async fn insert(&self, _notification: &Notification) -> AppResult<()> {
            Err(AppError::database("insert failed"))
        }

        async fn find_by_id(
            &self,
            _id: NotificationId,
            _recipient_id: RecipientId,
        ) -> AppResult<Option<Notification>> {
            Ok(None)
        }

        async fn list_unread(&self, _recipient_id: RecipientId) -> AppResult<Vec<Notification>> {
            Ok(Vec::new())
        }

        async fn list_page(
            &self,
            _recipient_id: RecipientId,
            page: &PageRequest,
        ) -> AppResult<PageResponse<Notification>> {
            Ok(PageResponse::empty(page))
        }

        async fn find_reminder_for_appointment(
            &self,
            _appointment_id: AppointmentId,
            _since: DateTime<Utc>,
        ) -> AppResult<Option<Notification>> {
            Ok(None)
        }

        async fn mark_read(
            &self,
            _id: NotificationId,
            _recipient_id: RecipientId,
        ) -> AppResult<Option<Notification>> {
            Ok(None)
        }

        async fn mark_all_read(&self, _recipient_id: RecipientId) -> AppResult<u64> {
            Ok(0)
        }

        async fn delete(
            &self,
            _id: NotificationId,
            _recipient_id: RecipientId,
        ) -> AppResult<bool> {
            Ok(false)
        }

        async fn delete_read(&self, _recipient_id: RecipientId) -> AppResult<u64> {
            Ok(0)
        }

        async fn delete_older_than(&self, _cutoff: DateTime<Utc>) -> AppResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_created_record_is_unread_and_pushed() {
        let store = Arc::new(MemoryNotificationStore::new());
        let registry = Arc::new(ConnectionRegistry::new(8));
        let dispatcher = dispatcher_with(store.clone(), registry.clone());

        let recipient = RecipientId::new();
        let (_handle, mut rx) = registry.register(recipient);

        let created = dispatcher.create_and_send(input(recipient)).await.unwrap();
        assert!(!created.is_read);
        assert_eq!(store.len().await, 1);

        let frame = rx.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["event"], "notification");
        assert_eq!(value["data"]["id"], created.id.to_string());
    }

    #[tokio::test]
    async fn test_offline_recipient_still_gets_record() {
        let store = Arc::new(MemoryNotificationStore::new());
        let registry = Arc::new(ConnectionRegistry::new(8));
        let dispatcher = dispatcher_with(store.clone(), registry);

        let recipient = RecipientId::new();
        dispatcher.create_and_send(input(recipient)).await.unwrap();

        let unread = dispatcher.service().list_unread(recipient).await.unwrap();
        assert_eq!(unread.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_insert_aborts_and_pushes_nothing() {
        let registry = Arc::new(ConnectionRegistry::new(8));
        let dispatcher = dispatcher_with(Arc::new(FailingStore), registry.clone());

        let recipient = RecipientId::new();
        let (_handle, mut rx) = registry.register(recipient);

        let err = dispatcher.create_and_send(input(recipient)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_blank_title_rejected() {
        let store = Arc::new(MemoryNotificationStore::new());
        let registry = Arc::new(ConnectionRegistry::new(8));
        let dispatcher = dispatcher_with(store.clone(), registry);

        let mut blank = input(RecipientId::new());
        blank.title = "   ".to_string();
        let err = dispatcher.create_and_send(blank).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expiration_override() {
        let store = Arc::new(MemoryNotificationStore::new());
        let registry = Arc::new(ConnectionRegistry::new(8));
        let dispatcher = dispatcher_with(store, registry);

        let expires_at = Utc::now() + chrono::Duration::days(3);
        let mut custom = input(RecipientId::new());
        custom.expires_at = Some(expires_at);

        let created = dispatcher.create_and_send(custom).await.unwrap();
        assert_eq!(created.expires_at, expires_at);
    }
}
