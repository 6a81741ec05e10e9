//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use praxis_core::types::id::{ChannelId, RecipientId};

/// A handle to a single live WebSocket connection.
///
/// Holds the sender half of the outbound channel; the receiver half is
/// drained by the socket task that owns the actual connection.
#[derive(Debug)]
pub struct ChannelHandle {
    /// Unique channel ID.
    pub id: ChannelId,
    /// The authenticated recipient on the other end.
    pub recipient_id: RecipientId,
    /// Sender for serialized outbound frames.
    pub sender: mpsc::Sender<String>,
    /// Whether the connection is still usable.
    alive: AtomicBool,
    /// When the connection was registered.
    pub connected_at: DateTime<Utc>,
}

impl ChannelHandle {
    /// Create a new live handle.
    pub fn new(recipient_id: RecipientId, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: ChannelId::new(),
            recipient_id,
            sender,
            alive: AtomicBool::new(true),
            connected_at: Utc::now(),
        }
    }

    /// Queue one serialized frame for this connection. Returns whether
    /// the frame was accepted. A full buffer drops the frame; a closed
    /// channel marks the handle dead.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(channel_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check whether the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection dead. No further frames will be queued.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
