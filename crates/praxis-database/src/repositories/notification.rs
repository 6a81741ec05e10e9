//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use praxis_core::error::{AppError, ErrorKind};
use praxis_core::result::AppResult;
use praxis_core::types::id::{AppointmentId, NotificationId, RecipientId};
use praxis_core::types::pagination::{PageRequest, PageResponse};
use praxis_entity::notification::{Notification, NotificationCategory, Severity};
use praxis_entity::traits::NotificationStore;

/// PostgreSQL-backed notification store.
///
/// Enums and the structured payload are stored as text and JSONB
/// respectively; rows are converted back to typed records on read.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw database row for a notification.
#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    recipient_id: Uuid,
    category: String,
    title: String,
    message: String,
    payload: Option<serde_json::Value>,
    severity: String,
    is_read: bool,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let category: NotificationCategory = row
            .category
            .parse()
            .map_err(|e: String| AppError::new(ErrorKind::Database, e))?;
        let severity: Severity = row
            .severity
            .parse()
            .map_err(|e: String| AppError::new(ErrorKind::Database, e))?;
        let payload = row
            .payload
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Malformed notification payload", e)
            })?;

        Ok(Self {
            id: NotificationId::from_uuid(row.id),
            recipient_id: RecipientId::from_uuid(row.recipient_id),
            category,
            title: row.title,
            message: row.message,
            payload,
            severity,
            is_read: row.is_read,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        let payload = notification
            .payload
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    "Failed to serialize notification payload",
                    e,
                )
            })?;

        sqlx::query(
            "INSERT INTO notifications \
             (id, recipient_id, category, title, message, payload, severity, is_read, created_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(notification.id)
        .bind(notification.recipient_id)
        .bind(notification.category.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(payload)
        .bind(notification.severity.as_str())
        .bind(notification.is_read)
        .bind(notification.created_at)
        .bind(notification.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert notification", e)
        })?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
        recipient_id: RecipientId,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notification", e))?
        .map(Notification::try_from)
        .transpose()
    }

    async fn list_unread(&self, recipient_id: RecipientId) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications WHERE recipient_id = $1 AND is_read = FALSE \
             ORDER BY created_at DESC",
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list unread notifications", e)
        })?;
        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn list_page(
        &self,
        recipient_id: RecipientId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE recipient_id = $1")
                .bind(recipient_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications WHERE recipient_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(recipient_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        let items = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_reminder_for_appointment(
        &self,
        appointment_id: AppointmentId,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications \
             WHERE category = 'appointment_reminder' \
               AND payload->>'appointment_id' = $1 \
               AND created_at >= $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(appointment_id.as_uuid().to_string())
        .bind(since)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up existing reminder", e)
        })?
        .map(Notification::try_from)
        .transpose()
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        recipient_id: RecipientId,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, NotificationRow>(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = $1 AND recipient_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification read", e)
        })?
        .map(Notification::try_from)
        .transpose()
    }

    async fn mark_all_read(&self, recipient_id: RecipientId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: NotificationId, recipient_id: RecipientId) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient_id = $2")
                .bind(id)
                .bind(recipient_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_read(&self, recipient_id: RecipientId) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM notifications WHERE recipient_id = $1 AND is_read = TRUE")
                .bind(recipient_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to delete read notifications",
                        e,
                    )
                })?;
        Ok(result.rows_affected())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to cleanup notifications", e)
            })?;
        Ok(result.rows_affected())
    }
}
