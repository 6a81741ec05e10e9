//! WebSocket upgrade handler and per-connection socket loop.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use praxis_core::config::RealtimeConfig;
use praxis_core::types::id::RecipientId;

use crate::authenticator::WsAuthenticator;
use crate::message::{EVENT_AUTH_ERROR, EVENT_AUTH_SUCCESS, EVENT_PONG, Envelope, InboundMessage};
use crate::registry::ConnectionRegistry;

/// Shared state for the WebSocket route.
#[derive(Debug, Clone)]
pub struct RealtimeState {
    /// Live connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Token validator for the authenticate handshake.
    pub authenticator: Arc<WsAuthenticator>,
    /// Realtime tuning knobs.
    pub config: RealtimeConfig,
}

/// Build the WebSocket router, mounted at `/ws`.
pub fn router(state: RealtimeState) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}

/// GET /ws — WebSocket upgrade.
async fn ws_handler(State(state): State<RealtimeState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Drive one WebSocket connection: authenticate-first handshake, then
/// pump outbound frames and answer pings until the peer goes away.
async fn handle_socket(state: RealtimeState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let recipient_id = match authenticate_first_message(&state, &mut ws_tx, &mut ws_rx).await {
        Some(recipient_id) => recipient_id,
        None => {
            let _ = ws_tx.close().await;
            return;
        }
    };

    let (handle, mut outbound_rx) = state.registry.register(recipient_id);
    let channel_id = handle.id;

    info!(
        channel_id = %channel_id,
        recipient_id = %recipient_id,
        "WebSocket connection established"
    );

    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<InboundMessage>(&text) {
                Ok(InboundMessage::Ping) => {
                    if let Ok(pong) = Envelope::new(EVENT_PONG, serde_json::json!({})) {
                        if let Ok(frame) = pong.to_frame() {
                            handle.send(frame);
                        }
                    }
                }
                Ok(InboundMessage::Authenticate { .. }) => {
                    // Already authenticated; ignore.
                    debug!(channel_id = %channel_id, "Duplicate authenticate message ignored");
                }
                Err(e) => {
                    debug!(channel_id = %channel_id, error = %e, "Unparseable inbound message");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(channel_id = %channel_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.registry.unregister_channel(recipient_id, channel_id);

    info!(
        channel_id = %channel_id,
        recipient_id = %recipient_id,
        "WebSocket connection closed"
    );
}

/// Run the authenticate-first handshake. The client must send an
/// `authenticate` message within the configured timeout; anything else
/// closes the connection.
async fn authenticate_first_message(
    state: &RealtimeState,
    ws_tx: &mut SplitSink<WebSocket, Message>,
    ws_rx: &mut SplitStream<WebSocket>,
) -> Option<RecipientId> {
    let timeout = Duration::from_secs(state.config.auth_timeout_seconds);
    let first = match tokio::time::timeout(timeout, ws_rx.next()).await {
        Ok(Some(Ok(Message::Text(text)))) => text,
        Ok(_) => {
            debug!("Connection closed before authenticating");
            return None;
        }
        Err(_) => {
            debug!("Authentication timed out");
            send_auth_error(ws_tx, "Authentication timed out").await;
            return None;
        }
    };

    let token = match serde_json::from_str::<InboundMessage>(&first) {
        Ok(InboundMessage::Authenticate { token }) => token,
        _ => {
            send_auth_error(ws_tx, "Expected an authenticate message").await;
            return None;
        }
    };

    match state.authenticator.authenticate(&token) {
        Ok(recipient_id) => {
            let ack = Envelope::new(
                EVENT_AUTH_SUCCESS,
                serde_json::json!({ "recipient_id": recipient_id }),
            )
            .ok()?;
            let frame = ack.to_frame().ok()?;
            ws_tx.send(Message::Text(frame.into())).await.ok()?;
            Some(recipient_id)
        }
        Err(e) => {
            debug!(error = %e, "WebSocket authentication failed");
            send_auth_error(ws_tx, &e.message).await;
            None
        }
    }
}

async fn send_auth_error(ws_tx: &mut SplitSink<WebSocket, Message>, message: &str) {
    if let Ok(envelope) = Envelope::new(EVENT_AUTH_ERROR, serde_json::json!({ "message": message }))
    {
        if let Ok(frame) = envelope.to_frame() {
            let _ = ws_tx.send(Message::Text(frame.into())).await;
        }
    }
}
