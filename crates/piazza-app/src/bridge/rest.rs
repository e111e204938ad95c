//! REST collaborator contract
//!
//! One trait method per endpoint the core issues. Implementations own the
//! transport entirely: base URL, auth header injection from the persisted
//! token, timeouts, and envelope unwrapping (`data` payload extraction).
//! The core only sees typed payloads or a [`RestError`].

use async_trait::async_trait;
use piazza_core::{
    Conversation, ConversationId, MediaItem, Message, Notification, NotificationId, Post, PostId,
    User, UserId, Visibility,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure surfaced by the REST collaborator.
#[derive(Debug, Clone, Error)]
pub enum RestError {
    /// The server handled the request and answered with an error envelope.
    #[error("server rejected request ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message text from the response envelope.
        message: String,
    },
    /// The request never completed (connection, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The response arrived but could not be decoded into the expected
    /// shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl RestError {
    /// The server-supplied message text, when the server produced one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The server message, or `fallback` for transport/decode failures.
    ///
    /// This is the text the workflows surface to the user.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

/// Credentials for [`RestBridge::login`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password; the transport is responsible for TLS.
    pub password: String,
}

/// Payload for [`RestBridge::register`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired handle.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Birth date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

/// A validated session returned by login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The signed-in user.
    pub user: User,
}

/// Payload for [`RestBridge::create_post`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Body text.
    pub content: String,
    /// Already-uploaded media descriptors.
    #[serde(default)]
    pub media: Vec<MediaItem>,
    /// Audience.
    #[serde(default)]
    pub visibility: Visibility,
    /// Optional mood tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeling: Option<String>,
    /// Optional location tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Users tagged in the post.
    #[serde(default)]
    pub tagged_users: Vec<UserId>,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Avatar URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Cover photo URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
}

/// The notification list envelope, with the server-computed unread count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Unread aggregate as the server sees it.
    pub unread_count: u32,
}

/// The authoritative answer to a like request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeOutcome {
    /// Full like set after the server applied the request.
    pub likes: Vec<UserId>,
    /// Like counter after the server applied the request.
    pub likes_count: u32,
}

/// The REST API consumed as a black box.
///
/// Methods that need authentication read the token the implementation
/// holds (injected at construction or from [`crate::bridge::LocalStore`]);
/// the core never threads tokens through individual calls.
#[async_trait]
pub trait RestBridge: Send + Sync {
    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /auth/login`
    async fn login(&self, request: LoginRequest) -> Result<AuthSession, RestError>;

    /// `POST /auth/register`
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession, RestError>;

    /// `GET /auth/me`
    async fn current_user(&self) -> Result<User, RestError>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<(), RestError>;

    /// `PATCH /users/profile`
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, RestError>;

    // =========================================================================
    // Users & Posts
    // =========================================================================

    /// `GET /users/profile/:username` - absent profiles are `Ok(None)`,
    /// rendered as an empty state, not an error.
    async fn profile(&self, username: &str) -> Result<Option<User>, RestError>;

    /// `GET /posts/user/:username`
    async fn user_posts(&self, username: &str) -> Result<Vec<Post>, RestError>;

    /// `GET /posts/feed?page=`
    async fn feed(&self, page: u32) -> Result<Vec<Post>, RestError>;

    /// `POST /posts`
    async fn create_post(&self, post: NewPost) -> Result<Post, RestError>;

    /// `POST /posts/:id/like`
    async fn like_post(&self, id: &PostId) -> Result<LikeOutcome, RestError>;

    /// `DELETE /posts/:id`
    async fn delete_post(&self, id: &PostId) -> Result<(), RestError>;

    // =========================================================================
    // Messaging
    // =========================================================================

    /// `GET /messages/conversations`
    async fn conversations(&self) -> Result<Vec<Conversation>, RestError>;

    /// `GET /messages/:conversationId`
    async fn messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RestError>;

    /// `POST /messages/:conversationId`
    async fn send_message(
        &self,
        conversation_id: &ConversationId,
        content: &str,
        attachments: Vec<MediaItem>,
    ) -> Result<Message, RestError>;

    // =========================================================================
    // Notifications
    // =========================================================================

    /// `GET /notifications`
    async fn notifications(&self) -> Result<NotificationFeed, RestError>;

    /// `POST /notifications/:id/read`
    async fn mark_notification_read(&self, id: &NotificationId) -> Result<(), RestError>;

    /// `POST /notifications/read-all`
    async fn mark_all_notifications_read(&self) -> Result<(), RestError>;
}

/// A no-op REST collaborator for offline/demo mode.
///
/// Reads resolve to empty results; anything that would mutate server state
/// fails with a transport error.
#[derive(Debug, Clone, Default)]
pub struct OfflineRestBridge;

impl OfflineRestBridge {
    fn offline<T>() -> Result<T, RestError> {
        Err(RestError::Transport("offline".into()))
    }
}

#[async_trait]
impl RestBridge for OfflineRestBridge {
    async fn login(&self, _request: LoginRequest) -> Result<AuthSession, RestError> {
        Self::offline()
    }

    async fn register(&self, _request: RegisterRequest) -> Result<AuthSession, RestError> {
        Self::offline()
    }

    async fn current_user(&self) -> Result<User, RestError> {
        Self::offline()
    }

    async fn logout(&self) -> Result<(), RestError> {
        Ok(())
    }

    async fn update_profile(&self, _update: ProfileUpdate) -> Result<User, RestError> {
        Self::offline()
    }

    async fn profile(&self, _username: &str) -> Result<Option<User>, RestError> {
        Ok(None)
    }

    async fn user_posts(&self, _username: &str) -> Result<Vec<Post>, RestError> {
        Ok(Vec::new())
    }

    async fn feed(&self, _page: u32) -> Result<Vec<Post>, RestError> {
        Ok(Vec::new())
    }

    async fn create_post(&self, _post: NewPost) -> Result<Post, RestError> {
        Self::offline()
    }

    async fn like_post(&self, _id: &PostId) -> Result<LikeOutcome, RestError> {
        Self::offline()
    }

    async fn delete_post(&self, _id: &PostId) -> Result<(), RestError> {
        Self::offline()
    }

    async fn conversations(&self) -> Result<Vec<Conversation>, RestError> {
        Ok(Vec::new())
    }

    async fn messages(
        &self,
        _conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RestError> {
        Ok(Vec::new())
    }

    async fn send_message(
        &self,
        _conversation_id: &ConversationId,
        _content: &str,
        _attachments: Vec<MediaItem>,
    ) -> Result<Message, RestError> {
        Self::offline()
    }

    async fn notifications(&self) -> Result<NotificationFeed, RestError> {
        Ok(NotificationFeed::default())
    }

    async fn mark_notification_read(&self, _id: &NotificationId) -> Result<(), RestError> {
        Self::offline()
    }

    async fn mark_all_notifications_read(&self) -> Result<(), RestError> {
        Self::offline()
    }
}
