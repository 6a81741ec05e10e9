//! Appointment record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::types::id::{AppointmentId, ClientId};

use super::AppointmentStatus;

/// A scheduled appointment between the practice and one client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment ID.
    pub id: AppointmentId,
    /// The client the appointment is with.
    pub client_id: ClientId,
    /// Short title shown in calendars and reminders.
    pub title: String,
    /// Scheduled start.
    pub start_at: DateTime<Utc>,
    /// Scheduled end.
    pub end_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: AppointmentStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Whether the appointment is still pending (reminder-eligible).
    pub fn is_pending(&self) -> bool {
        self.status == AppointmentStatus::Pending
    }
}
