//! Builders producing the standard copy for each notification category.

use praxis_core::types::id::RecipientId;
use praxis_entity::appointment::Appointment;
use praxis_entity::client::Client;
use praxis_entity::document::Document;
use praxis_entity::invoice::Invoice;
use praxis_entity::notification::{NotificationCategory, NotificationPayload, Severity};

use crate::dispatcher::NotificationInput;

fn format_instant(instant: chrono::DateTime<chrono::Utc>) -> String {
    instant.format("%d %B %Y at %H:%M").to_string()
}

/// Reminder for an upcoming appointment.
pub fn appointment_reminder(recipient_id: RecipientId, appointment: &Appointment) -> NotificationInput {
    NotificationInput::new(
        recipient_id,
        NotificationCategory::AppointmentReminder,
        "Upcoming appointment",
        format!(
            "Reminder: \"{}\" on {}.",
            appointment.title,
            format_instant(appointment.start_at)
        ),
    )
    .with_payload(NotificationPayload::AppointmentReminder {
        appointment_id: appointment.id,
        start_at: appointment.start_at,
        title: appointment.title.clone(),
    })
}

/// Notice that an appointment was cancelled.
pub fn appointment_cancellation(
    recipient_id: RecipientId,
    appointment: &Appointment,
    reason: Option<String>,
) -> NotificationInput {
    let message = match &reason {
        Some(reason) => format!(
            "Your appointment \"{}\" on {} was cancelled: {}.",
            appointment.title,
            format_instant(appointment.start_at),
            reason
        ),
        None => format!(
            "Your appointment \"{}\" on {} was cancelled.",
            appointment.title,
            format_instant(appointment.start_at)
        ),
    };
    NotificationInput::new(
        recipient_id,
        NotificationCategory::AppointmentCancellation,
        "Appointment cancelled",
        message,
    )
    .with_payload(NotificationPayload::AppointmentCancellation {
        appointment_id: appointment.id,
        start_at: appointment.start_at,
        title: appointment.title.clone(),
        reason,
    })
    .with_severity(Severity::Warning)
}

/// Notice that an appointment was rescheduled.
pub fn appointment_modification(
    recipient_id: RecipientId,
    appointment: &Appointment,
    old_start_at: chrono::DateTime<chrono::Utc>,
) -> NotificationInput {
    NotificationInput::new(
        recipient_id,
        NotificationCategory::AppointmentModification,
        "Appointment rescheduled",
        format!(
            "Your appointment \"{}\" was moved from {} to {}.",
            appointment.title,
            format_instant(old_start_at),
            format_instant(appointment.start_at)
        ),
    )
    .with_payload(NotificationPayload::AppointmentModification {
        appointment_id: appointment.id,
        old_start_at,
        new_start_at: appointment.start_at,
        title: appointment.title.clone(),
    })
}

/// Notice that a document was added to the recipient's file.
pub fn document_created(recipient_id: RecipientId, document: &Document) -> NotificationInput {
    NotificationInput::new(
        recipient_id,
        NotificationCategory::NewDocument,
        "New document",
        format!("A new document \"{}\" was added to your file.", document.file_name),
    )
    .with_payload(NotificationPayload::NewDocument {
        document_id: document.id,
        file_name: document.file_name.clone(),
    })
}

fn invoice_payload(invoice: &Invoice) -> NotificationPayload {
    NotificationPayload::Invoice {
        invoice_id: invoice.id,
        number: invoice.number.clone(),
        amount: invoice.amount,
    }
}

/// Notice that a new invoice was issued.
pub fn invoice_created(recipient_id: RecipientId, invoice: &Invoice) -> NotificationInput {
    NotificationInput::new(
        recipient_id,
        NotificationCategory::NewInvoice,
        "New invoice",
        format!(
            "Invoice {} over {:.2} was issued, due {}.",
            invoice.number,
            invoice.amount,
            invoice.due_date.format("%d %B %Y")
        ),
    )
    .with_payload(invoice_payload(invoice))
}

/// Confirmation that an invoice was paid.
pub fn invoice_paid(recipient_id: RecipientId, invoice: &Invoice) -> NotificationInput {
    NotificationInput::new(
        recipient_id,
        NotificationCategory::InvoicePaid,
        "Invoice paid",
        format!("Payment for invoice {} was received. Thank you.", invoice.number),
    )
    .with_payload(invoice_payload(invoice))
    .with_severity(Severity::Success)
}

/// Warning that an invoice is past its due date.
pub fn invoice_overdue(recipient_id: RecipientId, invoice: &Invoice) -> NotificationInput {
    NotificationInput::new(
        recipient_id,
        NotificationCategory::InvoiceOverdue,
        "Invoice overdue",
        format!(
            "Invoice {} over {:.2} was due {} and is still unpaid.",
            invoice.number,
            invoice.amount,
            invoice.due_date.format("%d %B %Y")
        ),
    )
    .with_payload(invoice_payload(invoice))
    .with_severity(Severity::Warning)
}

/// Reminder that a client's birthday is approaching. Addressed to the
/// client themselves.
pub fn birthday_reminder(client: &Client) -> Option<NotificationInput> {
    let birth_date = client.birth_date?;
    Some(
        NotificationInput::new(
            RecipientId::from(client.id),
            NotificationCategory::BirthdayReminder,
            "Birthday coming up",
            format!(
                "{}'s birthday is on {}.",
                client.full_name(),
                birth_date.format("%d %B")
            ),
        )
        .with_payload(NotificationPayload::Birthday {
            client_id: client.id,
            birth_date,
        }),
    )
}

/// Alert that a client has been inactive for a long stretch.
pub fn inactivity_alert(client: &Client) -> NotificationInput {
    let message = match client.last_visit_at {
        Some(last_visit) => format!(
            "{} has not visited since {}.",
            client.full_name(),
            format_instant(last_visit)
        ),
        None => format!("{} has no recorded visit yet.", client.full_name()),
    };
    NotificationInput::new(
        RecipientId::from(client.id),
        NotificationCategory::InactivityAlert,
        "We miss you",
        message,
    )
    .with_payload(NotificationPayload::Inactivity {
        client_id: client.id,
        last_visit: client.last_visit_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use praxis_core::types::id::{AppointmentId, ClientId, InvoiceId};
    use praxis_entity::appointment::AppointmentStatus;
    use praxis_entity::invoice::InvoiceStatus;

    fn appointment() -> Appointment {
        let start_at = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap();
        Appointment {
            id: AppointmentId::new(),
            client_id: ClientId::new(),
            title: "Consultation".to_string(),
            start_at,
            end_at: start_at + Duration::minutes(45),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reminder_copy_and_payload() {
        let appointment = appointment();
        let input = appointment_reminder(RecipientId::new(), &appointment);

        assert_eq!(input.category, NotificationCategory::AppointmentReminder);
        assert_eq!(input.severity, Severity::Info);
        assert!(input.message.contains("15 June 2024 at 14:30"));
        assert_eq!(
            input.payload.unwrap().appointment_id(),
            Some(appointment.id)
        );
    }

    #[test]
    fn test_cancellation_is_warning_with_reason() {
        let appointment = appointment();
        let input = appointment_cancellation(
            RecipientId::new(),
            &appointment,
            Some("practitioner unavailable".to_string()),
        );

        assert_eq!(input.severity, Severity::Warning);
        assert!(input.message.contains("practitioner unavailable"));
    }

    #[test]
    fn test_invoice_paid_is_success() {
        let invoice = Invoice {
            id: InvoiceId::new(),
            client_id: ClientId::new(),
            number: "INV-2024-0042".to_string(),
            amount: 120.0,
            due_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            status: InvoiceStatus::Paid,
            created_at: Utc::now(),
        };
        let input = invoice_paid(RecipientId::new(), &invoice);
        assert_eq!(input.severity, Severity::Success);
        assert!(input.message.contains("INV-2024-0042"));
    }

    #[test]
    fn test_birthday_requires_birth_date() {
        let mut client = Client {
            id: ClientId::new(),
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            email: None,
            birth_date: None,
            last_visit_at: None,
            created_at: Utc::now(),
        };
        assert!(birthday_reminder(&client).is_none());

        client.birth_date = NaiveDate::from_ymd_opt(1990, 6, 15);
        let input = birthday_reminder(&client).unwrap();
        assert_eq!(input.category, NotificationCategory::BirthdayReminder);
        assert!(input.message.contains("Ada Byron"));
    }
}
