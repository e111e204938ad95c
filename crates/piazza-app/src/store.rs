//! # Store Aggregator
//!
//! [`AppStore`] composes the six domain stores into one process-wide state
//! tree. There are no ambient globals: the store is an explicit value,
//! cloned cheaply (handles share state), and every view observes it by
//! subscribing to the cells it cares about. Each transition replaces the
//! affected domain snapshot wholesale.

use crate::config::AppConfig;
use crate::state::{
    AuthState, CallState, MessagesState, NotificationsState, PostsState, Toast, ToastLevel,
    UiState,
};
use piazza_core::StateCell;
use serde::Serialize;

/// The process-wide application state.
///
/// Cloning produces another handle to the same state; the real-time bridge
/// and the workflows all dispatch against the same tree.
#[derive(Clone)]
pub struct AppStore {
    config: AppConfig,
    /// Session state.
    pub auth: StateCell<AuthState>,
    /// Feed state.
    pub posts: StateCell<PostsState>,
    /// Messaging state.
    pub messages: StateCell<MessagesState>,
    /// Notification state.
    pub notifications: StateCell<NotificationsState>,
    /// Interface chrome state.
    pub ui: StateCell<UiState>,
    /// Call session state.
    pub call: StateCell<CallState>,
}

impl AppStore {
    /// Build a store with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            auth: StateCell::default(),
            posts: StateCell::default(),
            messages: StateCell::default(),
            notifications: StateCell::default(),
            ui: StateCell::default(),
            call: StateCell::default(),
        }
    }

    /// Build a store with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AppConfig::default())
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Queue a transient toast on the UI store.
    pub fn toast(&self, level: ToastLevel, message: impl Into<String>) {
        let toast = Toast::new(level, message);
        let max = self.config.max_toasts;
        self.ui.mutate(|ui| ui.push_toast(toast, max));
    }

    /// Reset the session-scoped stores (logout): credentials, feed,
    /// messages, and notifications. Interface chrome and any call state
    /// survive; the call surface owns its own teardown.
    pub fn reset_session(&self) {
        self.auth.mutate(AuthState::clear_credentials);
        self.posts.mutate(PostsState::clear);
        self.messages.mutate(MessagesState::clear);
        self.notifications.mutate(NotificationsState::clear);
    }

    /// Clone out the whole tree as one serializable snapshot.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            auth: self.auth.get(),
            posts: self.posts.get(),
            messages: self.messages.get(),
            notifications: self.notifications.get(),
            ui: self.ui.get(),
            call: self.call.get(),
        }
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// One immutable snapshot of the full state tree.
///
/// Serializable for debugging and inspection. The call store's runtime
/// handles (streams, peer connection) are serialization-exempt and simply
/// absent from the output.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    /// Session state.
    pub auth: AuthState,
    /// Feed state.
    pub posts: PostsState,
    /// Messaging state.
    pub messages: MessagesState,
    /// Notification state.
    pub notifications: NotificationsState,
    /// Interface chrome state.
    pub ui: UiState,
    /// Call session state (minus runtime handles).
    pub call: CallState,
}
