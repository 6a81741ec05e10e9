//! Invoice record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::types::id::{ClientId, InvoiceId};

use super::InvoiceStatus;

/// An invoice issued to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique invoice ID.
    pub id: InvoiceId,
    /// The client being billed.
    pub client_id: ClientId,
    /// Human-facing invoice number.
    pub number: String,
    /// Invoice total.
    pub amount: f64,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Payment status.
    pub status: InvoiceStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Whether the invoice is unpaid past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Pending && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overdue_only_when_pending() {
        let mut invoice = Invoice {
            id: InvoiceId::new(),
            client_id: ClientId::new(),
            number: "INV-2024-0001".to_string(),
            amount: 80.0,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: InvoiceStatus::Pending,
            created_at: Utc::now(),
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(invoice.is_overdue(today));

        invoice.status = InvoiceStatus::Paid;
        assert!(!invoice.is_overdue(today));

        invoice.status = InvoiceStatus::Pending;
        assert!(!invoice.is_overdue(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }
}
