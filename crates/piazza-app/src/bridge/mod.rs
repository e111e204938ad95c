//! # Collaborator Contracts
//!
//! The core consumes three external collaborators, each behind a trait so
//! the application stays pure and testable:
//!
//! - [`RestBridge`]: the HTTP API, one method per endpoint the core issues
//! - [`SocketBridge`]: the push transport (connect / event stream /
//!   disconnect); connection and reconnection mechanics are its own
//!   business
//! - [`LocalStore`]: persistent key/value storage for the auth token and
//!   theme preference
//!
//! Offline implementations are provided for demo mode and as the base for
//! test doubles.

mod local;
mod rest;
mod socket;

pub use local::{LocalStore, MemoryLocalStore};
pub use rest::{
    AuthSession, LikeOutcome, LoginRequest, NewPost, NotificationFeed, OfflineRestBridge,
    ProfileUpdate, RegisterRequest, RestBridge, RestError,
};
pub use socket::{OfflineSocketBridge, RawSocketEvent, SocketBridge, SocketError, SocketEventStream};
