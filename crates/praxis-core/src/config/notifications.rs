//! Notification record configuration.

use serde::{Deserialize, Serialize};

/// Settings governing stored notification records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Days after creation at which a record becomes eligible for
    /// expiry. Advisory; enforced by the cleanup sweep.
    #[serde(default = "default_expires_after_days")]
    pub expires_after_days: i64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            expires_after_days: default_expires_after_days(),
        }
    }
}

fn default_expires_after_days() -> i64 {
    30
}
