//! Socket collaborator contract
//!
//! The push transport is a black box: the core hands it a token, receives a
//! stream of named JSON events, and later disconnects. Reconnection,
//! backoff, and heartbeats are the transport's own concern - the stream
//! simply ends when the connection is gone.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// One event as delivered by the transport, before any validation.
#[derive(Debug, Clone)]
pub struct RawSocketEvent {
    /// Event name (`new-message`, `typing-start`, ...).
    pub name: String,
    /// Loosely-typed payload; validated at the real-time bridge boundary.
    pub payload: serde_json::Value,
}

impl RawSocketEvent {
    /// Build a raw event.
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// The inbound event stream for one connection. Closed by the transport
/// when the connection ends.
pub type SocketEventStream = mpsc::Receiver<RawSocketEvent>;

/// Failure surfaced by the socket collaborator.
#[derive(Debug, Clone, Error)]
pub enum SocketError {
    /// The server refused the credentials.
    #[error("socket authentication rejected: {0}")]
    Unauthorized(String),
    /// The connection could not be established.
    #[error("socket transport failure: {0}")]
    Transport(String),
}

/// The push transport consumed as a black box.
#[async_trait]
pub trait SocketBridge: Send + Sync {
    /// Open a connection with the given token and return its event stream.
    async fn connect(&self, token: &str) -> Result<SocketEventStream, SocketError>;

    /// Tear the connection down. Idempotent.
    async fn disconnect(&self);
}

/// A no-op socket for offline/demo mode: connecting yields a stream that is
/// already closed, so the consumer observes an immediate clean shutdown.
#[derive(Debug, Clone, Default)]
pub struct OfflineSocketBridge;

#[async_trait]
impl SocketBridge for OfflineSocketBridge {
    async fn connect(&self, _token: &str) -> Result<SocketEventStream, SocketError> {
        let (sender, receiver) = mpsc::channel(1);
        drop(sender);
        Ok(receiver)
    }

    async fn disconnect(&self) {}
}
