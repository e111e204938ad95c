//! # Real-Time Bridge
//!
//! Translates server-pushed socket events into store transitions. Each
//! named event maps to exactly one dispatch - no batching, debouncing, or
//! coalescing. Payloads are validated at this boundary by a tagged-union
//! decode step that fails closed: a malformed or unknown event is dropped
//! and logged, never turned into a store mutation.
//!
//! ## Lifecycle
//!
//! ```text
//! Disconnected ──credentials──> Connecting ──stream open──> Connected
//!      ^                            │                           │
//!      └── connect error ───────────┘      credentials cleared, │
//!      └────────────────────── transport error / stream end ────┘
//! ```
//!
//! Teardown is symmetric with connection: disconnecting stops the event
//! pump before anything else, so no translation fires after it.

use crate::bridge::{RawSocketEvent, SocketBridge, SocketError};
use crate::store::AppStore;
use piazza_core::{ConversationId, IncomingCall, Message, Notification, StateCell, UserId};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Connection phase of the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No connection, none being attempted.
    #[default]
    Disconnected,
    /// Credentials handed to the transport, stream not yet open.
    Connecting,
    /// Event stream open and pumping.
    Connected,
}

/// Why a raw event was dropped at the boundary.
#[derive(Debug, Error)]
pub enum EventDecodeError {
    /// The event name is not one the bridge consumes.
    #[error("unknown event '{0}'")]
    UnknownEvent(String),
    /// The payload did not match the event's expected shape.
    #[error("malformed '{name}' payload: {source}")]
    Payload {
        /// Event name.
        name: String,
        /// Underlying decode failure.
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypingPayload {
    conversation_id: ConversationId,
    user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadPayload {
    conversation_id: ConversationId,
}

/// A validated socket event, ready to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    /// `new-message`
    NewMessage(Message),
    /// `typing-start`
    TypingStart {
        /// Conversation being typed in.
        conversation_id: ConversationId,
        /// Typing user.
        user_id: UserId,
    },
    /// `typing-stop`
    TypingStop {
        /// Conversation being typed in.
        conversation_id: ConversationId,
        /// User who stopped.
        user_id: UserId,
    },
    /// `message-read`
    MessageRead {
        /// Conversation the peer read.
        conversation_id: ConversationId,
    },
    /// `new-notification`
    NewNotification(Notification),
    /// `incoming-call`
    IncomingCall(IncomingCall),
}

impl SocketEvent {
    /// Validate and narrow a raw event.
    ///
    /// This is the fail-closed boundary: anything that does not decode into
    /// one of the known shapes is rejected here.
    pub fn decode(raw: &RawSocketEvent) -> Result<Self, EventDecodeError> {
        let payload = |err| EventDecodeError::Payload {
            name: raw.name.clone(),
            source: err,
        };
        match raw.name.as_str() {
            "new-message" => serde_json::from_value(raw.payload.clone())
                .map(Self::NewMessage)
                .map_err(payload),
            "typing-start" => serde_json::from_value::<TypingPayload>(raw.payload.clone())
                .map(|p| Self::TypingStart {
                    conversation_id: p.conversation_id,
                    user_id: p.user_id,
                })
                .map_err(payload),
            "typing-stop" => serde_json::from_value::<TypingPayload>(raw.payload.clone())
                .map(|p| Self::TypingStop {
                    conversation_id: p.conversation_id,
                    user_id: p.user_id,
                })
                .map_err(payload),
            "message-read" => serde_json::from_value::<ReadPayload>(raw.payload.clone())
                .map(|p| Self::MessageRead {
                    conversation_id: p.conversation_id,
                })
                .map_err(payload),
            "new-notification" => serde_json::from_value(raw.payload.clone())
                .map(Self::NewNotification)
                .map_err(payload),
            "incoming-call" => serde_json::from_value(raw.payload.clone())
                .map(Self::IncomingCall)
                .map_err(payload),
            _ => Err(EventDecodeError::UnknownEvent(raw.name.clone())),
        }
    }
}

/// Apply one validated event as one store transition.
fn apply(store: &AppStore, event: SocketEvent) {
    match event {
        SocketEvent::NewMessage(message) => {
            store.messages.mutate(|m| m.add_message(message));
        }
        SocketEvent::TypingStart {
            conversation_id,
            user_id,
        } => {
            store
                .messages
                .mutate(|m| m.add_typing_user(conversation_id, user_id));
        }
        SocketEvent::TypingStop {
            conversation_id,
            user_id,
        } => {
            store
                .messages
                .mutate(|m| m.remove_typing_user(&conversation_id, &user_id));
        }
        SocketEvent::MessageRead { conversation_id } => {
            store
                .messages
                .mutate(|m| m.mark_conversation_read(&conversation_id));
        }
        SocketEvent::NewNotification(notification) => {
            store
                .notifications
                .mutate(|n| n.add_notification(notification));
        }
        SocketEvent::IncomingCall(call) => {
            store.call.mutate(|c| c.set_incoming_call(call));
        }
    }
}

fn dispatch_raw(store: &AppStore, raw: RawSocketEvent) {
    match SocketEvent::decode(&raw) {
        Ok(event) => apply(store, event),
        Err(error) => {
            warn!(event = %raw.name, %error, "dropping socket event");
        }
    }
}

/// The bridge between the socket collaborator and the store.
///
/// One instance per store. `connect` spawns a pump task that reads the
/// transport's event stream and dispatches each event; `disconnect` aborts
/// the pump first and then tears the transport down, so handlers cannot
/// fire after teardown.
pub struct RealtimeBridge {
    store: AppStore,
    socket: Arc<dyn SocketBridge>,
    status: StateCell<ConnectionStatus>,
    pump: async_lock::Mutex<Option<JoinHandle<()>>>,
}

impl RealtimeBridge {
    /// Build a bridge over the given transport.
    pub fn new(store: AppStore, socket: Arc<dyn SocketBridge>) -> Self {
        Self {
            store,
            socket,
            status: StateCell::default(),
            pump: async_lock::Mutex::new(None),
        }
    }

    /// Observable connection phase.
    pub fn status(&self) -> &StateCell<ConnectionStatus> {
        &self.status
    }

    /// Open the connection and start pumping events.
    ///
    /// A no-op when already connecting or connected: the transitions per
    /// event are registered once per connection, never stacked.
    pub async fn connect(&self, token: &str) -> Result<(), SocketError> {
        let mut pump = self.pump.lock().await;
        match pump.as_ref() {
            // Live connection: nothing to do.
            Some(active) if !active.is_finished() => return Ok(()),
            // The transport ended the stream on its own; the slot is stale.
            Some(_) => *pump = None,
            None => {}
        }

        self.status.set(ConnectionStatus::Connecting);
        let mut events = match self.socket.connect(token).await {
            Ok(events) => events,
            Err(error) => {
                self.status.set(ConnectionStatus::Disconnected);
                return Err(error);
            }
        };
        self.status.set(ConnectionStatus::Connected);
        debug!("realtime bridge connected");

        let store = self.store.clone();
        let status = self.status.clone();
        *pump = Some(tokio::spawn(async move {
            while let Some(raw) = events.recv().await {
                dispatch_raw(&store, raw);
            }
            // Transport closed the stream: connection is gone.
            status.set(ConnectionStatus::Disconnected);
            debug!("realtime event stream ended");
        }));
        Ok(())
    }

    /// Tear the connection down. Idempotent.
    ///
    /// The pump stops before the transport is told to disconnect, which
    /// guarantees no dispatch happens after this returns.
    pub async fn disconnect(&self) {
        let mut pump = self.pump.lock().await;
        if let Some(active) = pump.take() {
            active.abort();
            let _ = active.await;
        }
        self.socket.disconnect().await;
        self.status.set(ConnectionStatus::Disconnected);
        debug!("realtime bridge disconnected");
    }

    /// React to an auth transition, the way the shell observes them:
    /// credentials appearing connect the bridge, credentials disappearing
    /// disconnect it. Redundant calls are no-ops.
    pub async fn handle_auth_change(&self, token: Option<&str>) -> Result<(), SocketError> {
        match token {
            Some(token) => self.connect(token).await,
            None => {
                self.disconnect().await;
                Ok(())
            }
        }
    }
}
