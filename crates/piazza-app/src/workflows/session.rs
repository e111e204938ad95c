//! Session bootstrap and preference persistence
//!
//! The shell persists two values between launches: the auth token and the
//! theme. [`bootstrap`] reads both at startup to decide the initial
//! authentication/theme state; the theme setters write back through the
//! same store.

use crate::bridge::LocalStore;
use crate::state::Theme;
use crate::store::AppStore;
use tracing::debug;

/// Key under which the auth token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Key under which the theme preference is persisted.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Restore persisted client state at startup.
///
/// A persisted theme is applied directly. A persisted token is recorded as
/// pending - the session only becomes authenticated once
/// [`crate::workflows::auth::load_current_user`] validates it against the
/// server. Returns the restored token, when one exists, so the shell can
/// kick off that validation.
pub fn bootstrap(store: &AppStore, local: &dyn LocalStore) -> Option<String> {
    if let Some(value) = local.get(THEME_STORAGE_KEY) {
        let theme = Theme::from_persisted(&value);
        store.ui.mutate(|ui| ui.set_theme(theme));
    }

    let token = local.get(TOKEN_STORAGE_KEY);
    if let Some(token) = &token {
        store.auth.mutate(|auth| auth.set_pending_token(token.clone()));
        debug!("restored persisted session token");
    }
    token
}

/// Set the theme and persist the preference.
pub fn set_theme(store: &AppStore, local: &dyn LocalStore, theme: Theme) {
    store.ui.mutate(|ui| ui.set_theme(theme));
    local.set(THEME_STORAGE_KEY, theme.as_str());
}

/// Flip the theme and persist the new preference.
pub fn toggle_theme(store: &AppStore, local: &dyn LocalStore) -> Theme {
    let theme = store.ui.mutate(|ui| ui.toggle_theme());
    local.set(THEME_STORAGE_KEY, theme.as_str());
    theme
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::MemoryLocalStore;

    #[test]
    fn bootstrap_restores_theme_and_pending_token() {
        let store = AppStore::with_defaults();
        let local = MemoryLocalStore::new();
        local.set(THEME_STORAGE_KEY, "dark");
        local.set(TOKEN_STORAGE_KEY, "tok-1");

        let token = bootstrap(&store, &local);

        assert_eq!(token.as_deref(), Some("tok-1"));
        assert_eq!(store.ui.get().theme, Theme::Dark);
        let auth = store.auth.get();
        assert_eq!(auth.token.as_deref(), Some("tok-1"));
        assert!(!auth.is_authenticated, "token awaits validation");
    }

    #[test]
    fn bootstrap_with_empty_storage_changes_nothing() {
        let store = AppStore::with_defaults();
        let local = MemoryLocalStore::new();
        assert!(bootstrap(&store, &local).is_none());
        assert_eq!(store.ui.get().theme, Theme::Light);
        assert!(store.auth.get().token.is_none());
    }

    #[test]
    fn theme_setters_persist_the_preference() {
        let store = AppStore::with_defaults();
        let local = MemoryLocalStore::new();

        set_theme(&store, &local, Theme::Dark);
        assert_eq!(local.get(THEME_STORAGE_KEY).as_deref(), Some("dark"));

        let flipped = toggle_theme(&store, &local);
        assert_eq!(flipped, Theme::Light);
        assert_eq!(local.get(THEME_STORAGE_KEY).as_deref(), Some("light"));
    }
}
