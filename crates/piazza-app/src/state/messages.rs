//! Messaging state
//!
//! Owns the message list and conversation summaries for the active chat
//! surface, plus the ephemeral typing indicator map.

use piazza_core::{Conversation, ConversationId, Message, MessageId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State of the messaging surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagesState {
    /// Known conversation summaries.
    pub conversations: Vec<Conversation>,
    /// The conversation currently open, when any.
    pub current_conversation: Option<Conversation>,
    /// Messages held for the active chat surface.
    pub messages: Vec<Message>,
    /// A messaging fetch is in flight.
    pub is_loading: bool,
    /// Last fetch failure, as user-facing text.
    pub error: Option<String>,
    /// Conversation id → users currently typing. Ephemeral; rebuilt purely
    /// from live start/stop events, never fetched.
    #[serde(default)]
    pub typing_users: HashMap<ConversationId, Vec<UserId>>,
}

impl MessagesState {
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

    fn conversation_mut(&mut self, id: &ConversationId) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == *id)
    }

    /// Switch the open conversation; the message list is untouched.
    pub fn set_current_conversation(&mut self, conversation: Option<Conversation>) {
        self.current_conversation = conversation;
    }

    /// Append a message, idempotently.
    ///
    /// A message whose id is already held is not appended again (the list
    /// length is unchanged). The matching conversation's denormalized
    /// `last_message` is overwritten either way - last writer wins by call
    /// order, not by timestamp; callers only pass genuinely newest
    /// messages. Both the socket bridge and the send-confirmation flow go
    /// through this one path.
    pub fn add_message(&mut self, message: Message) {
        if let Some(conversation) = self.conversation_mut(&message.conversation) {
            conversation.last_message = Some(message.clone());
        }
        if !self.messages.iter().any(|m| m.id == message.id) {
            self.messages.push(message);
        }
    }

    /// Replace a message by id; no-op when absent.
    pub fn update_message(&mut self, message: Message) {
        if let Some(existing) = self.messages.iter_mut().find(|m| m.id == message.id) {
            *existing = message;
        }
    }

    /// Remove a message by id; no-op when absent.
    pub fn delete_message(&mut self, id: &MessageId) {
        self.messages.retain(|m| m.id != *id);
    }

    /// Mark one conversation read: zero its unread counter and flip every
    /// held message of that conversation to read. Other conversations'
    /// messages are untouched. Store-local and optimistic - it does not
    /// wait for server acknowledgement.
    pub fn mark_conversation_read(&mut self, conversation_id: &ConversationId) {
        if let Some(conversation) = self.conversation_mut(conversation_id) {
            conversation.unread_count = 0;
        }
        for message in &mut self.messages {
            if message.conversation == *conversation_id {
                message.is_read = true;
            }
        }
    }

    /// Users currently typing in a conversation.
    pub fn typing_in(&self, conversation_id: &ConversationId) -> &[UserId] {
        self.typing_users
            .get(conversation_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Record a typing-start; set semantics, so a repeat is a no-op.
    pub fn add_typing_user(&mut self, conversation_id: ConversationId, user_id: UserId) {
        let entry = self.typing_users.entry(conversation_id).or_default();
        if !entry.contains(&user_id) {
            entry.push(user_id);
        }
    }

    /// Record a typing-stop; an emptied set is pruned from the map.
    pub fn remove_typing_user(&mut self, conversation_id: &ConversationId, user_id: &UserId) {
        if let Some(entry) = self.typing_users.get_mut(conversation_id) {
            entry.retain(|u| u != user_id);
            if entry.is_empty() {
                self.typing_users.remove(conversation_id);
            }
        }
    }

    /// Bump a conversation's unread counter; no-op when unknown.
    pub fn increment_unread(&mut self, conversation_id: &ConversationId) {
        if let Some(conversation) = self.conversation_mut(conversation_id) {
            conversation.unread_count = conversation.unread_count.saturating_add(1);
        }
    }

    /// Drop the active chat context (used on logout and surface teardown).
    pub fn clear(&mut self) {
        self.messages.clear();
        self.current_conversation = None;
    }
}
