//! Real-time WebSocket engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound message buffer size per channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Seconds a fresh connection may remain unauthenticated before it
    /// is closed.
    #[serde(default = "default_auth_timeout")]
    pub auth_timeout_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            auth_timeout_seconds: default_auth_timeout(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

fn default_auth_timeout() -> u64 {
    10
}
