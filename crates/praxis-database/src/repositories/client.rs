//! Client repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use praxis_core::error::{AppError, ErrorKind};
use praxis_core::result::AppResult;
use praxis_core::types::id::ClientId;
use praxis_entity::client::Client;
use praxis_entity::traits::ClientDirectory;

/// PostgreSQL-backed client directory.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: Option<String>,
    birth_date: Option<NaiveDate>,
    last_visit_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: ClientId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            birth_date: row.birth_date,
            last_visit_at: row.last_visit_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ClientDirectory for ClientRepository {
    async fn find_with_birth_dates(&self) -> AppResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            "SELECT * FROM clients WHERE birth_date IS NOT NULL ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list clients with birth dates", e)
        })?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn find_inactive(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            "SELECT * FROM clients \
             WHERE last_visit_at IS NULL OR last_visit_at < $1 \
             ORDER BY last_visit_at ASC NULLS FIRST",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list inactive clients", e)
        })?;
        Ok(rows.into_iter().map(Client::from).collect())
    }
}
