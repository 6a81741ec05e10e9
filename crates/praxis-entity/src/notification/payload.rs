//! Per-category notification payloads.
//!
//! Each category that carries contextual identifiers has its own payload
//! variant, so mismatched fields are caught at compile time instead of
//! living in an open map. The payload is contextual data only; the
//! record's `category` field is authoritative and never re-derived from
//! the payload.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::types::id::{AppointmentId, ClientId, DocumentId, InvoiceId};

/// Structured payload attached to a notification, keyed per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// Context for an upcoming appointment reminder.
    AppointmentReminder {
        /// The appointment being reminded about.
        appointment_id: AppointmentId,
        /// When the appointment starts.
        start_at: DateTime<Utc>,
        /// Appointment title.
        title: String,
    },
    /// Context for a cancelled appointment.
    AppointmentCancellation {
        /// The cancelled appointment.
        appointment_id: AppointmentId,
        /// The start time it had.
        start_at: DateTime<Utc>,
        /// Appointment title.
        title: String,
        /// Cancellation reason, if one was given.
        reason: Option<String>,
    },
    /// Context for a rescheduled appointment.
    AppointmentModification {
        /// The rescheduled appointment.
        appointment_id: AppointmentId,
        /// Previous start time.
        old_start_at: DateTime<Utc>,
        /// New start time.
        new_start_at: DateTime<Utc>,
        /// Appointment title.
        title: String,
    },
    /// Context for a newly added document.
    NewDocument {
        /// The document.
        document_id: DocumentId,
        /// Original file name.
        file_name: String,
    },
    /// Context for invoice lifecycle events (issued, paid, overdue).
    Invoice {
        /// The invoice.
        invoice_id: InvoiceId,
        /// Human-facing invoice number.
        number: String,
        /// Invoice total.
        amount: f64,
    },
    /// Context for a birthday reminder.
    Birthday {
        /// The client whose birthday approaches.
        client_id: ClientId,
        /// Their date of birth.
        birth_date: NaiveDate,
    },
    /// Context for an inactivity alert.
    Inactivity {
        /// The inactive client.
        client_id: ClientId,
        /// Their last recorded visit, if any.
        last_visit: Option<DateTime<Utc>>,
    },
    /// Context for client lifecycle notices.
    Client {
        /// The client record concerned.
        client_id: ClientId,
    },
}

impl NotificationPayload {
    /// The appointment this payload references, if it is an appointment
    /// payload. Used by the reminder idempotence lookup.
    pub fn appointment_id(&self) -> Option<AppointmentId> {
        match self {
            Self::AppointmentReminder { appointment_id, .. }
            | Self::AppointmentCancellation { appointment_id, .. }
            | Self::AppointmentModification { appointment_id, .. } => Some(*appointment_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_payload_serializes_with_kind_tag() {
        let payload = NotificationPayload::AppointmentReminder {
            appointment_id: AppointmentId::new(),
            start_at: Utc::now(),
            title: "Consultation".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["kind"], "appointment_reminder");
        assert!(value["appointment_id"].is_string());
    }

    #[test]
    fn test_appointment_id_extraction() {
        let id = AppointmentId::new();
        let payload = NotificationPayload::AppointmentCancellation {
            appointment_id: id,
            start_at: Utc::now(),
            title: "Checkup".to_string(),
            reason: Some("no-show".to_string()),
        };
        assert_eq!(payload.appointment_id(), Some(id));

        let other = NotificationPayload::Client {
            client_id: ClientId::new(),
        };
        assert_eq!(other.appointment_id(), None);
    }

    #[test]
    fn test_payload_roundtrip() {
        let payload = NotificationPayload::Invoice {
            invoice_id: InvoiceId::new(),
            number: "INV-2024-0042".to_string(),
            amount: 120.0,
        };
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: NotificationPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }
}
