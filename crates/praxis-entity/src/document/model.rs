//! Document record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::types::id::{ClientId, DocumentId};

/// A document filed against a client record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID.
    pub id: DocumentId,
    /// The client the document belongs to.
    pub client_id: ClientId,
    /// Original file name.
    pub file_name: String,
    /// MIME type, if detected.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: u64,
    /// When the document was added.
    pub created_at: DateTime<Utc>,
}
