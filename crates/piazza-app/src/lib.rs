//! # Piazza App
//!
//! Portable headless application core for Piazza. This crate owns the
//! client-side state of the product and nothing else: no rendering, no
//! transport implementations, no persistence engine.
//!
//! ## Architecture
//!
//! ```text
//! user action ─┐                         ┌─> view re-render (poll)
//!              ├─> store transition ─> StateCell snapshot
//! socket event ┘         ^
//!                        │
//!      workflows (async fetches against the REST collaborator)
//!      realtime (socket events translated one-to-one into transitions)
//! ```
//!
//! - [`state`]: the six domain stores (auth, posts, messages,
//!   notifications, ui, call), plain structs with transition methods
//! - [`store`]: the aggregator composing them into one observable tree
//! - [`bridge`]: collaborator contracts (REST, socket, local key/value)
//!   consumed as black boxes, with offline implementations
//! - [`realtime`]: the bridge translating server-pushed events into store
//!   transitions
//! - [`workflows`]: async fetch operations following the three-phase
//!   loading/success/failure contract

pub mod bridge;
pub mod config;
pub mod realtime;
pub mod state;
pub mod store;
pub mod workflows;

pub use bridge::{
    AuthSession, LikeOutcome, LocalStore, LoginRequest, MemoryLocalStore, NewPost,
    NotificationFeed, OfflineRestBridge, OfflineSocketBridge, ProfileUpdate, RawSocketEvent,
    RegisterRequest, RestBridge, RestError, SocketBridge, SocketError, SocketEventStream,
};
pub use config::AppConfig;
pub use realtime::{ConnectionStatus, EventDecodeError, RealtimeBridge, SocketEvent};
pub use state::{
    AuthState, CallMediaGuard, CallState, ImageViewer, MediaStreamHandle, MessagesState,
    NotificationsState, PeerConnectionHandle, PostsState, Theme, Toast, ToastLevel, UiState,
};
pub use store::{AppStore, StateSnapshot};
