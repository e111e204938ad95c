//! Messaging workflows

use crate::bridge::{RestBridge, RestError};
use crate::state::ToastLevel;
use crate::store::AppStore;
use piazza_core::{ConversationId, MediaItem};

const FETCH_CONVERSATIONS_FAILED: &str = "Failed to fetch conversations";
const FETCH_MESSAGES_FAILED: &str = "Failed to fetch messages";
const SEND_MESSAGE_FAILED: &str = "Failed to send message";

/// Load the conversation list.
pub async fn fetch_conversations(store: &AppStore, rest: &dyn RestBridge) -> Result<(), RestError> {
    store.messages.mutate(|messages| messages.begin_loading());
    match rest.conversations().await {
        Ok(conversations) => {
            store.messages.mutate(|state| {
                state.is_loading = false;
                state.conversations = conversations;
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(FETCH_CONVERSATIONS_FAILED).to_owned();
            store.messages.mutate(|state| state.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Load the message history of one conversation, replacing the held list.
pub async fn fetch_messages(
    store: &AppStore,
    rest: &dyn RestBridge,
    conversation_id: &ConversationId,
) -> Result<(), RestError> {
    store.messages.mutate(|messages| messages.begin_loading());
    match rest.messages(conversation_id).await {
        Ok(messages) => {
            store.messages.mutate(|state| {
                state.is_loading = false;
                state.messages = messages;
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(FETCH_MESSAGES_FAILED).to_owned();
            store.messages.mutate(|state| state.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Send a message; the server's copy is appended through the idempotent
/// path, so a copy already delivered over the socket is not duplicated.
pub async fn send_message(
    store: &AppStore,
    rest: &dyn RestBridge,
    conversation_id: &ConversationId,
    content: &str,
    attachments: Vec<MediaItem>,
) -> Result<(), RestError> {
    store.messages.mutate(|messages| messages.begin_loading());
    match rest.send_message(conversation_id, content, attachments).await {
        Ok(message) => {
            store.messages.mutate(|state| {
                state.is_loading = false;
                state.add_message(message);
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(SEND_MESSAGE_FAILED).to_owned();
            store.messages.mutate(|state| state.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}
