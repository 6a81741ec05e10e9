//! Wire messages exchanged over the WebSocket channel.

use serde::{Deserialize, Serialize};

use praxis_core::error::AppError;
use praxis_core::result::AppResult;
use praxis_entity::notification::Notification;

/// Event name for pushed notification records.
pub const EVENT_NOTIFICATION: &str = "notification";
/// Event name acknowledging a successful authentication.
pub const EVENT_AUTH_SUCCESS: &str = "auth_success";
/// Event name reporting a failed authentication.
pub const EVENT_AUTH_ERROR: &str = "auth_error";
/// Event name answering a client ping.
pub const EVENT_PONG: &str = "pong";

/// Outbound frame: a named event with a JSON data payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Event name.
    pub event: String,
    /// Event payload.
    pub data: serde_json::Value,
}

impl Envelope {
    /// Build an envelope from an event name and serializable payload.
    pub fn new(event: &str, data: impl Serialize) -> AppResult<Self> {
        Ok(Self {
            event: event.to_string(),
            data: serde_json::to_value(data).map_err(AppError::from)?,
        })
    }

    /// Build the push envelope for a notification record.
    pub fn notification(notification: &Notification) -> AppResult<Self> {
        Self::new(EVENT_NOTIFICATION, notification)
    }

    /// Serialize to a wire frame.
    pub fn to_frame(&self) -> AppResult<String> {
        serde_json::to_string(self).map_err(AppError::from)
    }
}

/// Inbound client message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// First message on a fresh connection; carries the JWT.
    Authenticate {
        /// Bearer token issued at login.
        token: String,
    },
    /// Keep-alive probe.
    Ping,
}
