//! # Piazza Core
//!
//! Leaf crate for the Piazza client application core. It holds the pieces
//! every other layer shares:
//!
//! - [`identifiers`]: server-assigned identifier newtypes
//! - [`entities`]: entity shapes as they appear on the wire
//! - [`reactive`]: the versioned observable cell the stores are built on
//!
//! This crate performs no I/O and is not coupled to any async runtime.

pub mod entities;
pub mod identifiers;
pub mod reactive;

pub use entities::{
    ActiveCall, CallKind, CallStatus, Comment, Conversation, Gender, Group, GroupPrivacy,
    IncomingCall, MediaItem, MediaKind, Message, Notification, Post, Reaction, Story, User,
    Visibility,
};
pub use identifiers::{CallId, ConversationId, MessageId, NotificationId, PostId, UserId};
pub use reactive::{StateCell, StateSubscription};
