//! Connection registry — tracks the live connection per recipient.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use praxis_core::types::id::{ChannelId, RecipientId};

use crate::handle::ChannelHandle;
use crate::message::Envelope;

/// Thread-safe registry of active WebSocket connections.
///
/// Each recipient holds at most one connection; registering a new one
/// supersedes and closes the previous handle.
#[derive(Debug)]
pub struct ConnectionRegistry {
    connections: DashMap<RecipientId, Arc<ChannelHandle>>,
    buffer_size: usize,
}

impl ConnectionRegistry {
    /// Create an empty registry with the given per-connection outbound
    /// buffer size.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            connections: DashMap::new(),
            buffer_size,
        }
    }

    /// Register a connection for a recipient, superseding any previous
    /// one. Returns the handle plus the receiver the socket task drains.
    pub fn register(
        &self,
        recipient_id: RecipientId,
    ) -> (Arc<ChannelHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(ChannelHandle::new(recipient_id, tx));

        if let Some(previous) = self.connections.insert(recipient_id, handle.clone()) {
            previous.mark_dead();
            debug!(
                recipient_id = %recipient_id,
                superseded = %previous.id,
                "Superseded existing connection"
            );
        }

        (handle, rx)
    }

    /// Remove whatever connection a recipient currently has.
    pub fn unregister(&self, recipient_id: RecipientId) -> Option<Arc<ChannelHandle>> {
        self.connections.remove(&recipient_id).map(|(_, handle)| {
            handle.mark_dead();
            handle
        })
    }

    /// Remove a specific connection, identified by its channel ID.
    ///
    /// A stale socket task unregistering after being superseded must not
    /// evict its replacement, so the entry is only removed when the IDs
    /// match.
    pub fn unregister_channel(&self, recipient_id: RecipientId, channel_id: ChannelId) {
        let removed = self
            .connections
            .remove_if(&recipient_id, |_, handle| handle.id == channel_id);
        if let Some((_, handle)) = removed {
            handle.mark_dead();
        }
    }

    /// Push an envelope to a recipient's live connection, if any.
    /// Returns whether a frame was queued.
    pub fn push_to_recipient(&self, recipient_id: RecipientId, envelope: &Envelope) -> bool {
        let Some(handle) = self
            .connections
            .get(&recipient_id)
            .map(|entry| entry.value().clone())
        else {
            return false;
        };
        match envelope.to_frame() {
            Ok(frame) => handle.send(frame),
            Err(_) => false,
        }
    }

    /// Push an envelope to every live connection. Returns the number of
    /// connections that accepted the frame.
    pub fn broadcast(&self, envelope: &Envelope) -> usize {
        let Ok(frame) = envelope.to_frame() else {
            return 0;
        };
        self.connections
            .iter()
            .filter(|entry| entry.value().send(frame.clone()))
            .count()
    }

    /// Whether a recipient currently has a live connection.
    pub fn is_online(&self, recipient_id: RecipientId) -> bool {
        self.connections
            .get(&recipient_id)
            .map(|entry| entry.value().is_alive())
            .unwrap_or(false)
    }

    /// Number of registered connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Close every connection, used during shutdown.
    pub fn close_all(&self) {
        for entry in self.connections.iter() {
            entry.value().mark_dead();
        }
        self.connections.clear();
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::EVENT_NOTIFICATION;

    fn envelope() -> Envelope {
        Envelope::new(EVENT_NOTIFICATION, serde_json::json!({"title": "Hi"})).unwrap()
    }

    #[tokio::test]
    async fn test_push_reaches_registered_recipient() {
        let registry = ConnectionRegistry::new(8);
        let recipient = RecipientId::new();
        let (_handle, mut rx) = registry.register(recipient);

        assert!(registry.push_to_recipient(recipient, &envelope()));
        let frame = rx.recv().await.unwrap();
        assert!(frame.contains("\"event\":\"notification\""));
    }

    #[tokio::test]
    async fn test_push_to_offline_recipient_is_noop() {
        let registry = ConnectionRegistry::new(8);
        assert!(!registry.push_to_recipient(RecipientId::new(), &envelope()));
    }

    #[tokio::test]
    async fn test_reconnect_supersedes_previous_connection() {
        let registry = ConnectionRegistry::new(8);
        let recipient = RecipientId::new();

        let (first, _rx1) = registry.register(recipient);
        let (second, mut rx2) = registry.register(recipient);

        assert!(!first.is_alive());
        assert_eq!(registry.connection_count(), 1);

        assert!(registry.push_to_recipient(recipient, &envelope()));
        assert!(rx2.recv().await.is_some());
        assert!(second.is_alive());
    }

    #[tokio::test]
    async fn test_stale_unregister_keeps_replacement() {
        let registry = ConnectionRegistry::new(8);
        let recipient = RecipientId::new();

        let (first, _rx1) = registry.register(recipient);
        let (_second, _rx2) = registry.register(recipient);

        // The superseded socket task cleans up late.
        registry.unregister_channel(recipient, first.id);
        assert!(registry.is_online(recipient));
        assert_eq!(registry.connection_count(), 1);
    }

    #[tokio::test]
    async fn test_broadcast_counts_deliveries() {
        let registry = ConnectionRegistry::new(8);
        let (_a, _rx_a) = registry.register(RecipientId::new());
        let (_b, _rx_b) = registry.register(RecipientId::new());

        assert_eq!(registry.broadcast(&envelope()), 2);
    }

    #[tokio::test]
    async fn test_close_all_empties_registry() {
        let registry = ConnectionRegistry::new(8);
        let recipient = RecipientId::new();
        let (handle, _rx) = registry.register(recipient);

        registry.close_all();
        assert!(!handle.is_alive());
        assert_eq!(registry.connection_count(), 0);
        assert!(!registry.is_online(recipient));
    }
}
