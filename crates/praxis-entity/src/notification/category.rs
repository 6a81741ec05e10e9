//! Notification category enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a notification. Closed taxonomy; determines the default
/// copy and the payload shape, never derived from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    /// Upcoming appointment reminder.
    AppointmentReminder,
    /// An appointment was cancelled.
    AppointmentCancellation,
    /// An appointment was rescheduled.
    AppointmentModification,
    /// A new document was added to the recipient's file.
    NewDocument,
    /// A new invoice was issued.
    NewInvoice,
    /// An invoice was paid.
    InvoicePaid,
    /// An invoice is past its due date.
    InvoiceOverdue,
    /// A client's birthday is approaching.
    BirthdayReminder,
    /// A client has not visited for a long time.
    InactivityAlert,
    /// System-level notice.
    System,
    /// A client record was created.
    ClientCreated,
    /// A client record was updated.
    ClientUpdated,
    /// A client record was deleted.
    ClientDeleted,
}

impl NotificationCategory {
    /// Return the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppointmentReminder => "appointment_reminder",
            Self::AppointmentCancellation => "appointment_cancellation",
            Self::AppointmentModification => "appointment_modification",
            Self::NewDocument => "new_document",
            Self::NewInvoice => "new_invoice",
            Self::InvoicePaid => "invoice_paid",
            Self::InvoiceOverdue => "invoice_overdue",
            Self::BirthdayReminder => "birthday_reminder",
            Self::InactivityAlert => "inactivity_alert",
            Self::System => "system",
            Self::ClientCreated => "client_created",
            Self::ClientUpdated => "client_updated",
            Self::ClientDeleted => "client_deleted",
        }
    }
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appointment_reminder" => Ok(Self::AppointmentReminder),
            "appointment_cancellation" => Ok(Self::AppointmentCancellation),
            "appointment_modification" => Ok(Self::AppointmentModification),
            "new_document" => Ok(Self::NewDocument),
            "new_invoice" => Ok(Self::NewInvoice),
            "invoice_paid" => Ok(Self::InvoicePaid),
            "invoice_overdue" => Ok(Self::InvoiceOverdue),
            "birthday_reminder" => Ok(Self::BirthdayReminder),
            "inactivity_alert" => Ok(Self::InactivityAlert),
            "system" => Ok(Self::System),
            "client_created" => Ok(Self::ClientCreated),
            "client_updated" => Ok(Self::ClientUpdated),
            "client_deleted" => Ok(Self::ClientDeleted),
            other => Err(format!("unknown notification category: '{other}'")),
        }
    }
}
