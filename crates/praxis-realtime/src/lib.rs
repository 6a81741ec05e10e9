//! # praxis-realtime
//!
//! WebSocket push channel for Praxis. Keeps a registry of live
//! connections indexed by recipient and delivers notification events to
//! whoever is online; delivery is best-effort and never blocks the
//! caller.

pub mod authenticator;
pub mod handle;
pub mod message;
pub mod registry;
pub mod socket;

pub use authenticator::WsAuthenticator;
pub use handle::ChannelHandle;
pub use message::Envelope;
pub use registry::ConnectionRegistry;
