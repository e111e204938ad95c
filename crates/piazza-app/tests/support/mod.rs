//! Shared fixtures and collaborator doubles for the integration suites.

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use piazza_app::bridge::{
    AuthSession, LikeOutcome, LoginRequest, NewPost, NotificationFeed, ProfileUpdate,
    RawSocketEvent, RegisterRequest, RestBridge, RestError, SocketBridge, SocketError,
    SocketEventStream,
};
use piazza_core::{
    Conversation, ConversationId, Message, MessageId, Notification, NotificationId, Post, PostId,
    User, UserId, Visibility,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

// ============================================================================
// Entity fixtures
// ============================================================================

pub fn ts() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

pub fn user(id: &str) -> User {
    User {
        id: UserId::from(id),
        username: format!("user-{id}"),
        email: format!("{id}@example.com"),
        first_name: "Test".into(),
        last_name: "User".into(),
        avatar: None,
        cover_photo: None,
        bio: None,
        date_of_birth: None,
        gender: None,
        location: None,
        website: None,
        is_verified: false,
        is_online: true,
        last_seen: None,
        friends: vec![],
        followers: vec![],
        following: vec![],
        created_at: ts(),
    }
}

pub fn post(id: &str, author: &str) -> Post {
    Post {
        id: PostId::from(id),
        user: user(author),
        content: format!("post {id}"),
        media: vec![],
        visibility: Visibility::Public,
        feeling: None,
        location: None,
        tagged_users: vec![],
        likes: vec![],
        likes_count: 0,
        comments_count: 0,
        share_count: 0,
        view_count: 0,
        is_pinned: false,
        is_archived: false,
        created_at: ts(),
    }
}

pub fn message(id: &str, conversation: &str, sender: &str) -> Message {
    Message {
        id: MessageId::from(id),
        conversation: ConversationId::from(conversation),
        sender: user(sender),
        content: Some(format!("message {id}")),
        media: None,
        reactions: vec![],
        is_read: false,
        created_at: ts(),
    }
}

pub fn conversation(id: &str) -> Conversation {
    Conversation {
        id: ConversationId::from(id),
        participants: vec![user("u1"), user("u2")],
        last_message: None,
        unread_count: 0,
        is_group: false,
        group_name: None,
        group_avatar: None,
        created_at: ts(),
    }
}

pub fn notification(id: &str, is_read: bool) -> Notification {
    Notification {
        id: NotificationId::from(id),
        sender: user("u2"),
        kind: "like".into(),
        title: "New like".into(),
        message: format!("notification {id}"),
        is_read,
        created_at: ts(),
    }
}

/// Encode an entity the way the transport would deliver it.
pub fn wire<T: serde::Serialize>(entity: &T) -> serde_json::Value {
    serde_json::to_value(entity).expect("entity serializes")
}

// ============================================================================
// Async settling
// ============================================================================

/// Poll `condition` until it holds or the deadline passes.
pub async fn wait_for(condition: impl Fn() -> bool) {
    let deadline = Duration::from_secs(2);
    let poll = Duration::from_millis(5);
    let result = tokio::time::timeout(deadline, async {
        while !condition() {
            tokio::time::sleep(poll).await;
        }
    })
    .await;
    assert!(result.is_ok(), "condition not reached within {deadline:?}");
}

/// Give in-flight pump work a moment to land (used before asserting that
/// something did NOT happen).
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

// ============================================================================
// Scripted socket collaborator
// ============================================================================

/// A socket double the test drives by hand: `connect` opens a fresh channel
/// and parks the sender for the test to push events through.
#[derive(Default)]
pub struct ScriptedSocket {
    sender: Mutex<Option<mpsc::Sender<RawSocketEvent>>>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    refuse_next: Mutex<Option<SocketError>>,
}

impl ScriptedSocket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `connect` fail with `error`.
    pub fn refuse_next_connect(&self, error: SocketError) {
        *self.refuse_next.lock().unwrap() = Some(error);
    }

    /// Push an event into the open connection.
    pub async fn push(&self, event: RawSocketEvent) {
        let sender = self
            .sender
            .lock()
            .unwrap()
            .clone()
            .expect("socket not connected");
        sender.send(event).await.expect("event accepted");
    }

    /// Try to push; `false` when the connection is gone.
    pub async fn try_push(&self, event: RawSocketEvent) -> bool {
        let sender = self.sender.lock().unwrap().clone();
        match sender {
            Some(sender) => sender.send(event).await.is_ok(),
            None => false,
        }
    }

    /// Simulate the transport losing the connection (stream ends).
    pub fn drop_connection(&self) {
        self.sender.lock().unwrap().take();
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SocketBridge for ScriptedSocket {
    async fn connect(&self, _token: &str) -> Result<SocketEventStream, SocketError> {
        if let Some(error) = self.refuse_next.lock().unwrap().take() {
            return Err(error);
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        let (sender, receiver) = mpsc::channel(16);
        *self.sender.lock().unwrap() = Some(sender);
        Ok(receiver)
    }

    async fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.sender.lock().unwrap().take();
    }
}

// ============================================================================
// Scripted REST collaborator
// ============================================================================

fn unscripted<T>() -> Result<T, RestError> {
    Err(RestError::Transport("no scripted response".into()))
}

#[derive(Default)]
struct Scripts {
    login: VecDeque<Result<AuthSession, RestError>>,
    register: VecDeque<Result<AuthSession, RestError>>,
    current_user: VecDeque<Result<User, RestError>>,
    logout: VecDeque<Result<(), RestError>>,
    update_profile: VecDeque<Result<User, RestError>>,
    feed: VecDeque<Result<Vec<Post>, RestError>>,
    create_post: VecDeque<Result<Post, RestError>>,
    like_post: VecDeque<Result<LikeOutcome, RestError>>,
    delete_post: VecDeque<Result<(), RestError>>,
    conversations: VecDeque<Result<Vec<Conversation>, RestError>>,
    messages: VecDeque<Result<Vec<Message>, RestError>>,
    send_message: VecDeque<Result<Message, RestError>>,
    notifications: VecDeque<Result<NotificationFeed, RestError>>,
    mark_read: VecDeque<Result<(), RestError>>,
    mark_all_read: VecDeque<Result<(), RestError>>,
}

/// A REST double with per-endpoint scripted responses, consumed in order.
/// Unscripted calls fail with a transport error.
#[derive(Default)]
pub struct ScriptedRest {
    scripts: Mutex<Scripts>,
}

macro_rules! script_setter {
    ($setter:ident, $field:ident, $ty:ty) => {
        pub fn $setter(&self, result: Result<$ty, RestError>) {
            self.scripts.lock().unwrap().$field.push_back(result);
        }
    };
}

impl ScriptedRest {
    pub fn new() -> Self {
        Self::default()
    }

    script_setter!(script_login, login, AuthSession);
    script_setter!(script_register, register, AuthSession);
    script_setter!(script_current_user, current_user, User);
    script_setter!(script_logout, logout, ());
    script_setter!(script_update_profile, update_profile, User);
    script_setter!(script_feed, feed, Vec<Post>);
    script_setter!(script_create_post, create_post, Post);
    script_setter!(script_like_post, like_post, LikeOutcome);
    script_setter!(script_delete_post, delete_post, ());
    script_setter!(script_conversations, conversations, Vec<Conversation>);
    script_setter!(script_messages, messages, Vec<Message>);
    script_setter!(script_send_message, send_message, Message);
    script_setter!(script_notifications, notifications, NotificationFeed);
    script_setter!(script_mark_read, mark_read, ());
    script_setter!(script_mark_all_read, mark_all_read, ());
}

#[async_trait]
impl RestBridge for ScriptedRest {
    async fn login(&self, _request: LoginRequest) -> Result<AuthSession, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .login
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn register(&self, _request: RegisterRequest) -> Result<AuthSession, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .register
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn current_user(&self) -> Result<User, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .current_user
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn logout(&self) -> Result<(), RestError> {
        self.scripts
            .lock()
            .unwrap()
            .logout
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn update_profile(&self, _update: ProfileUpdate) -> Result<User, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .update_profile
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn profile(&self, _username: &str) -> Result<Option<User>, RestError> {
        Ok(None)
    }

    async fn user_posts(&self, _username: &str) -> Result<Vec<Post>, RestError> {
        Ok(Vec::new())
    }

    async fn feed(&self, _page: u32) -> Result<Vec<Post>, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .feed
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn create_post(&self, _post: NewPost) -> Result<Post, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .create_post
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn like_post(&self, _id: &PostId) -> Result<LikeOutcome, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .like_post
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn delete_post(&self, _id: &PostId) -> Result<(), RestError> {
        self.scripts
            .lock()
            .unwrap()
            .delete_post
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn conversations(&self) -> Result<Vec<Conversation>, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .conversations
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn messages(&self, _conversation_id: &ConversationId) -> Result<Vec<Message>, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .messages
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn send_message(
        &self,
        _conversation_id: &ConversationId,
        _content: &str,
        _attachments: Vec<piazza_core::MediaItem>,
    ) -> Result<Message, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .send_message
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn notifications(&self) -> Result<NotificationFeed, RestError> {
        self.scripts
            .lock()
            .unwrap()
            .notifications
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn mark_notification_read(&self, _id: &NotificationId) -> Result<(), RestError> {
        self.scripts
            .lock()
            .unwrap()
            .mark_read
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn mark_all_notifications_read(&self) -> Result<(), RestError> {
        self.scripts
            .lock()
            .unwrap()
            .mark_all_read
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

/// Install a test subscriber so dropped-event warnings show up under
/// `--nocapture`; repeated calls are fine.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("piazza_app=debug")
        .with_test_writer()
        .try_init();
}
