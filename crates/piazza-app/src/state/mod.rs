//! # Domain Stores
//!
//! Six independent state containers, one per entity family. Each is a plain
//! struct whose methods are the store's transition operations; the
//! aggregator in [`crate::store`] owns one [`piazza_core::StateCell`] per
//! container, and every transition commits through `mutate` so it is atomic
//! and observable.
//!
//! Async fetches live in [`crate::workflows`]; nothing here touches a
//! collaborator.

pub mod auth;
pub mod call;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod ui;

pub use auth::AuthState;
pub use call::{CallMediaGuard, CallState, MediaStreamHandle, PeerConnectionHandle};
pub use messages::MessagesState;
pub use notifications::NotificationsState;
pub use posts::PostsState;
pub use ui::{ImageViewer, Theme, Toast, ToastLevel, UiState};
