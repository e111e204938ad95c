//! Authentication workflows

use crate::bridge::{LocalStore, LoginRequest, ProfileUpdate, RegisterRequest, RestBridge, RestError};
use crate::state::ToastLevel;
use crate::store::AppStore;
use crate::workflows::session::TOKEN_STORAGE_KEY;
use tracing::debug;

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";
const LOAD_USER_FAILED: &str = "Failed to load user";
const LOGOUT_FAILED: &str = "Logout failed";
const UPDATE_PROFILE_FAILED: &str = "Failed to update profile";

/// Sign in, persist the token, and install the session.
pub async fn login(
    store: &AppStore,
    rest: &dyn RestBridge,
    local: &dyn LocalStore,
    request: LoginRequest,
) -> Result<(), RestError> {
    store.auth.mutate(|auth| auth.begin_loading());
    match rest.login(request).await {
        Ok(session) => {
            local.set(TOKEN_STORAGE_KEY, &session.token);
            store
                .auth
                .mutate(|auth| auth.set_credentials(session.user, session.token));
            debug!("login succeeded");
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(LOGIN_FAILED).to_owned();
            store.auth.mutate(|auth| auth.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Create an account, persist the token, and install the session.
pub async fn register(
    store: &AppStore,
    rest: &dyn RestBridge,
    local: &dyn LocalStore,
    request: RegisterRequest,
) -> Result<(), RestError> {
    store.auth.mutate(|auth| auth.begin_loading());
    match rest.register(request).await {
        Ok(session) => {
            local.set(TOKEN_STORAGE_KEY, &session.token);
            store
                .auth
                .mutate(|auth| auth.set_credentials(session.user, session.token));
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(REGISTER_FAILED).to_owned();
            store.auth.mutate(|auth| auth.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Validate the pending session by loading the current user.
///
/// Run after [`crate::workflows::session::bootstrap`] restored a token.
pub async fn load_current_user(store: &AppStore, rest: &dyn RestBridge) -> Result<(), RestError> {
    store.auth.mutate(|auth| auth.begin_loading());
    match rest.current_user().await {
        Ok(user) => {
            store.auth.mutate(|auth| auth.set_user(user));
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(LOAD_USER_FAILED).to_owned();
            store.auth.mutate(|auth| auth.fail(message));
            Err(error)
        }
    }
}

/// Sign out: tell the server, drop the persisted token, and reset every
/// session-scoped store.
///
/// The local session is cleared only on a confirmed logout; a failed call
/// records the error and leaves the session in place for a retry.
pub async fn logout(
    store: &AppStore,
    rest: &dyn RestBridge,
    local: &dyn LocalStore,
) -> Result<(), RestError> {
    store.auth.mutate(|auth| auth.begin_loading());
    match rest.logout().await {
        Ok(()) => {
            local.remove(TOKEN_STORAGE_KEY);
            store.reset_session();
            debug!("logout complete");
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(LOGOUT_FAILED).to_owned();
            store.auth.mutate(|auth| auth.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Update the signed-in user's profile with the server's answer.
pub async fn update_profile(
    store: &AppStore,
    rest: &dyn RestBridge,
    update: ProfileUpdate,
) -> Result<(), RestError> {
    store.auth.mutate(|auth| auth.begin_loading());
    match rest.update_profile(update).await {
        Ok(user) => {
            store.auth.mutate(|auth| auth.set_user(user));
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(UPDATE_PROFILE_FAILED).to_owned();
            store.auth.mutate(|auth| auth.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}
