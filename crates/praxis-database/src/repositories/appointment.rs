//! Appointment repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use praxis_core::error::{AppError, ErrorKind};
use praxis_core::result::AppResult;
use praxis_core::types::id::{AppointmentId, ClientId};
use praxis_entity::appointment::{Appointment, AppointmentStatus};
use praxis_entity::traits::AppointmentDirectory;

/// PostgreSQL-backed appointment directory.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    /// Create a new appointment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    client_id: Uuid,
    title: String,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = AppError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status: AppointmentStatus = row
            .status
            .parse()
            .map_err(|e: String| AppError::new(ErrorKind::Database, e))?;
        Ok(Self {
            id: AppointmentId::from_uuid(row.id),
            client_id: ClientId::from_uuid(row.client_id),
            title: row.title,
            start_at: row.start_at,
            end_at: row.end_at,
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AppointmentDirectory for AppointmentRepository {
    async fn find_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            "SELECT * FROM appointments \
             WHERE status = 'pending' AND start_at >= $1 AND start_at < $2 \
             ORDER BY start_at ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list upcoming appointments", e)
        })?;
        rows.into_iter().map(Appointment::try_from).collect()
    }
}
