//! Entity shapes shared across the client core
//!
//! These structs mirror the JSON payloads produced by the REST and socket
//! collaborators: camelCase field names, `_id` identifiers, RFC 3339
//! timestamps. They carry no behavior; all state transitions live in the
//! domain stores.

use crate::identifiers::{CallId, ConversationId, MessageId, NotificationId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user identity record.
///
/// Referenced (not owned) by posts, messages, conversations, and
/// notifications as an embedded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Unique handle.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar image URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Cover photo URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    /// Free-form biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Birth date as supplied at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Self-reported gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Free-form location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Personal website URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Verified-account flag.
    #[serde(default)]
    pub is_verified: bool,
    /// Presence flag maintained by the server.
    #[serde(default)]
    pub is_online: bool,
    /// Last-seen timestamp, when offline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    /// Ids of confirmed friends.
    #[serde(default)]
    pub friends: Vec<UserId>,
    /// Ids of followers.
    #[serde(default)]
    pub followers: Vec<UserId>,
    /// Ids of followed users.
    #[serde(default)]
    pub following: Vec<UserId>,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// One attached media element (shared by posts, messages, and stories).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Media kind.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Resource URI.
    pub url: String,
}

/// Kind discriminant for [`MediaItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Audience for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone.
    #[default]
    Public,
    /// Visible to confirmed friends.
    Friends,
    /// Visible to the author only.
    Private,
}

/// A feed post.
///
/// Counters and the like set are mutated in place by the post store; the
/// record is removed wholesale on delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: PostId,
    /// Author snapshot (denormalized, not authoritative).
    pub user: User,
    /// Body text.
    pub content: String,
    /// Ordered media attachments.
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
    /// Ids of users who liked the post.
    #[serde(default)]
    pub likes: Vec<UserId>,
    /// Like counter, kept in lockstep with `likes` by the store.
    #[serde(default)]
    pub likes_count: u32,
    /// Comment counter.
    #[serde(default)]
    pub comments_count: u32,
    /// Share counter.
    #[serde(default)]
    pub share_count: u32,
    /// View counter.
    #[serde(default)]
    pub view_count: u32,
    /// Pinned-to-profile flag.
    #[serde(default)]
    pub is_pinned: bool,
    /// Archived flag.
    #[serde(default)]
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Author snapshot.
    pub user: User,
    /// Body text.
    pub content: String,
    /// Reply counter.
    #[serde(default)]
    pub reply_count: u32,
    /// Reaction counter.
    #[serde(default)]
    pub reaction_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One reaction on a message.
///
/// The wire allows duplicate entries per user; the store does not dedupe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Reacting user.
    pub user: UserId,
    /// Emoji shortcode or literal.
    pub emoji: String,
}

/// A chat message.
///
/// Append-only within its conversation except for read-flag and reaction
/// updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Server-assigned identifier, unique within the message list.
    #[serde(rename = "_id")]
    pub id: MessageId,
    /// Owning conversation.
    pub conversation: ConversationId,
    /// Sender snapshot.
    pub sender: User,
    /// Body text, absent for pure media messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Single media attachment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaItem>,
    /// Reactions in arrival order.
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    /// Read flag.
    #[serde(default)]
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A conversation summary for the chat surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ConversationId,
    /// Participants, including the current user.
    pub participants: Vec<User>,
    /// Denormalized copy of the newest message; display convenience only,
    /// never the source of truth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    /// Unread message counter.
    #[serde(default)]
    pub unread_count: u32,
    /// Group-conversation flag.
    #[serde(default)]
    pub is_group: bool,
    /// Group display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Group avatar URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_avatar: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A notification feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: NotificationId,
    /// Originating user snapshot.
    pub sender: User,
    /// Type tag (e.g. "like", "comment", "friend-request").
    #[serde(rename = "type")]
    pub kind: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Read flag.
    #[serde(default)]
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An ephemeral story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Author snapshot.
    pub user: User,
    /// Story media.
    pub media: MediaItem,
    /// Optional caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Viewer counter.
    #[serde(default)]
    pub viewer_count: u32,
    /// Reaction counter.
    #[serde(default)]
    pub reaction_count: u32,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Privacy level of a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupPrivacy {
    Public,
    Private,
    Secret,
}

/// A user group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Avatar URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Creator snapshot.
    pub creator: User,
    /// Admin user ids.
    #[serde(default)]
    pub admins: Vec<UserId>,
    /// Member user ids.
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Member counter.
    #[serde(default)]
    pub member_count: u32,
    /// Privacy level.
    pub privacy: GroupPrivacy,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Audio/video discriminant for calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Audio,
    Video,
}

/// Lifecycle status of an active call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Connecting,
    Connected,
    Ended,
}

/// An inbound ring, as pushed by the socket collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingCall {
    /// Signaling session identifier.
    pub call_id: CallId,
    /// Calling user snapshot.
    pub from: User,
    /// Opaque session-description offer, relayed verbatim to the call UI.
    pub offer: serde_json::Value,
    /// Audio or video.
    #[serde(rename = "callType")]
    pub kind: CallKind,
}

/// The call the user is currently in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCall {
    /// Signaling session identifier.
    pub call_id: CallId,
    /// Remote party snapshot.
    pub user: User,
    /// Audio or video.
    #[serde(rename = "callType")]
    pub kind: CallKind,
    /// Lifecycle status.
    pub status: CallStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    #[test]
    fn user_decodes_from_collaborator_json() {
        let json = r#"{
            "_id": "u1",
            "username": "ada",
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "isVerified": true,
            "isOnline": false,
            "friends": ["u2"],
            "followers": [],
            "following": ["u2", "u3"],
            "createdAt": "2023-11-14T22:13:20Z"
        }"#;
        let user: User = serde_json::from_str(json).expect("decode user");
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.first_name, "Ada");
        assert!(user.is_verified);
        assert_eq!(user.following.len(), 2);
        assert_eq!(user.created_at, ts());
        assert!(user.avatar.is_none());
    }

    #[test]
    fn message_decodes_with_defaults() {
        let json = r#"{
            "_id": "m1",
            "conversation": "c1",
            "sender": {
                "_id": "u1",
                "username": "ada",
                "email": "ada@example.com",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "createdAt": "2023-11-14T22:13:20Z"
            },
            "content": "hello",
            "createdAt": "2023-11-14T22:13:20Z"
        }"#;
        let message: Message = serde_json::from_str(json).expect("decode message");
        assert_eq!(message.conversation, ConversationId::from("c1"));
        assert!(!message.is_read);
        assert!(message.reactions.is_empty());
        assert!(message.media.is_none());
    }

    #[test]
    fn visibility_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&Visibility::Friends).expect("encode"),
            "\"friends\""
        );
        let v: Visibility = serde_json::from_str("\"private\"").expect("decode");
        assert_eq!(v, Visibility::Private);
    }

    #[test]
    fn incoming_call_decodes_socket_payload() {
        let json = r#"{
            "callId": "call-9",
            "from": {
                "_id": "u2",
                "username": "grace",
                "email": "grace@example.com",
                "firstName": "Grace",
                "lastName": "Hopper",
                "createdAt": "2023-11-14T22:13:20Z"
            },
            "offer": {"sdp": "v=0", "type": "offer"},
            "callType": "video"
        }"#;
        let call: IncomingCall = serde_json::from_str(json).expect("decode call");
        assert_eq!(call.call_id, CallId::from("call-9"));
        assert_eq!(call.kind, CallKind::Video);
        assert_eq!(call.offer["type"], "offer");
    }

    #[test]
    fn media_item_uses_type_discriminant() {
        let json = r#"{"type": "image", "url": "https://cdn/p.png"}"#;
        let item: MediaItem = serde_json::from_str(json).expect("decode media");
        assert_eq!(item.kind, MediaKind::Image);
    }
}
