//! Authentication state

use piazza_core::User;
use serde::{Deserialize, Serialize};

/// Session state for the signed-in user.
///
/// `token` may be present without `is_authenticated` while a persisted
/// token is being validated at startup; only a successful current-user load
/// or login flips the flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthState {
    /// The signed-in user, once loaded.
    pub user: Option<User>,
    /// Bearer token for the collaborators.
    pub token: Option<String>,
    /// Whether a validated session exists.
    pub is_authenticated: bool,
    /// An auth fetch is in flight.
    pub is_loading: bool,
    /// Last auth fetch failure, as user-facing text.
    pub error: Option<String>,
}

impl AuthState {
    /// Begin a fetch: loading on, previous error cleared.
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Terminal failure: loading off, error text recorded.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(message.into());
    }

    /// Install a validated session.
    pub fn set_credentials(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
        self.is_loading = false;
        self.error = None;
    }

    /// Record a persisted token awaiting validation.
    pub fn set_pending_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Replace the user snapshot (current-user load, profile update) and
    /// mark the session validated.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    /// Drop the session entirely.
    pub fn clear_credentials(&mut self) {
        *self = Self::default();
    }

    /// Clear a stale error without touching the session.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
