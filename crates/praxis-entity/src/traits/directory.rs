//! Read-only domain directories consulted by the reminder scans.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use praxis_core::result::AppResult;

use crate::appointment::Appointment;
use crate::client::Client;

/// Read-only view over appointments.
#[async_trait]
pub trait AppointmentDirectory: Send + Sync {
    /// Pending appointments starting within `[from, to)`.
    async fn find_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>>;
}

/// Read-only view over clients.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// All clients with a recorded birth date.
    async fn find_with_birth_dates(&self) -> AppResult<Vec<Client>>;

    /// Clients with no visit since the cutoff, including clients with
    /// no recorded visit at all.
    async fn find_inactive(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Client>>;
}
