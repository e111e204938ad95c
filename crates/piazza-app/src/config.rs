//! Application configuration

/// Default number of posts requested per feed page.
pub const DEFAULT_FEED_PAGE_SIZE: u32 = 10;

/// Default cap on queued transient toasts; the oldest is dropped beyond it.
pub const DEFAULT_MAX_TOASTS: usize = 8;

/// Default capacity of the socket event channel handed to the pump.
pub const DEFAULT_SOCKET_BUFFER: usize = 64;

/// Construction-time configuration for [`crate::AppStore`].
///
/// Everything has a sensible default; embedding shells override what they
/// need.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Page size hint passed to the feed collaborator.
    pub feed_page_size: u32,
    /// Cap on queued transient toasts.
    pub max_toasts: usize,
    /// Capacity of the socket event channel.
    pub socket_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_page_size: DEFAULT_FEED_PAGE_SIZE,
            max_toasts: DEFAULT_MAX_TOASTS,
            socket_buffer: DEFAULT_SOCKET_BUFFER,
        }
    }
}
