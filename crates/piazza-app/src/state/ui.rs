//! Interface chrome state
//!
//! Theme, layout toggles, modal flags, the image viewer, and the transient
//! toast queue. Theme persistence happens in `workflows::session`; this
//! module is pure state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable string form, used as the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value; anything unrecognized falls back to light.
    pub fn from_persisted(value: &str) -> Self {
        match value {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}

/// Severity of a transient toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

/// One transient toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Client-generated identity for dismissal.
    pub id: Uuid,
    /// Severity.
    pub level: ToastLevel,
    /// User-facing text.
    pub message: String,
}

impl Toast {
    /// Build a toast with a fresh id.
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
        }
    }
}

/// Full-screen image viewer state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageViewer {
    /// Whether the viewer is shown.
    pub open: bool,
    /// Image URIs being browsed.
    pub images: Vec<String>,
    /// Index of the image on screen.
    pub index: usize,
}

/// State of the interface chrome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiState {
    /// Color theme.
    pub theme: Theme,
    /// Sidebar visibility.
    pub sidebar_open: bool,
    /// Post-composer modal visibility.
    pub create_post_modal_open: bool,
    /// Image viewer.
    pub image_viewer: ImageViewer,
    /// Narrow-layout flag maintained by the shell.
    pub is_mobile: bool,
    /// Transient toasts, oldest first.
    pub toasts: Vec<Toast>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sidebar_open: true,
            create_post_modal_open: false,
            image_viewer: ImageViewer::default(),
            is_mobile: false,
            toasts: Vec::new(),
        }
    }
}

impl UiState {
    /// Set the theme directly.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Flip the theme, returning the new value.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Flip sidebar visibility.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Set sidebar visibility.
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    /// Show the post composer.
    pub fn open_create_post_modal(&mut self) {
        self.create_post_modal_open = true;
    }

    /// Hide the post composer.
    pub fn close_create_post_modal(&mut self) {
        self.create_post_modal_open = false;
    }

    /// Open the image viewer on `images[index]`.
    pub fn open_image_viewer(&mut self, images: Vec<String>, index: usize) {
        self.image_viewer = ImageViewer {
            open: true,
            images,
            index,
        };
    }

    /// Close the viewer and drop its images.
    pub fn close_image_viewer(&mut self) {
        self.image_viewer = ImageViewer::default();
    }

    /// Move the viewer to another image.
    pub fn set_image_viewer_index(&mut self, index: usize) {
        self.image_viewer.index = index;
    }

    /// Record the shell's layout breakpoint.
    pub fn set_is_mobile(&mut self, is_mobile: bool) {
        self.is_mobile = is_mobile;
    }

    /// Queue a toast, dropping the oldest beyond `max`.
    pub fn push_toast(&mut self, toast: Toast, max: usize) {
        self.toasts.push(toast);
        if self.toasts.len() > max {
            let overflow = self.toasts.len() - max;
            self.toasts.drain(0..overflow);
        }
    }

    /// Remove a toast by id (user dismissal or timer expiry).
    pub fn dismiss_toast(&mut self, id: &Uuid) {
        self.toasts.retain(|t| t.id != *id);
    }
}
