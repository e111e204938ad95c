//! Real-time bridge contract tests: one dispatch per event, idempotent
//! message delivery, fail-closed decoding, and symmetric teardown.

mod support;

use piazza_app::bridge::{RawSocketEvent, SocketError};
use piazza_app::realtime::{ConnectionStatus, RealtimeBridge};
use piazza_app::store::AppStore;
use piazza_core::{ConversationId, UserId};
use serde_json::json;
use std::sync::Arc;
use support::{conversation, init_tracing, message, notification, settle, user, wait_for, wire};

fn harness() -> (AppStore, Arc<support::ScriptedSocket>, RealtimeBridge) {
    init_tracing();
    let store = AppStore::with_defaults();
    let socket = Arc::new(support::ScriptedSocket::new());
    let bridge = RealtimeBridge::new(store.clone(), socket.clone());
    (store, socket, bridge)
}

#[tokio::test]
async fn new_message_events_dispatch_into_the_message_store() {
    let (store, socket, bridge) = harness();
    store
        .messages
        .mutate(|m| m.conversations.push(conversation("c1")));
    bridge.connect("tok").await.expect("connect");

    socket
        .push(RawSocketEvent::new("new-message", wire(&message("m1", "c1", "u2"))))
        .await;

    wait_for(|| store.messages.get().messages.len() == 1).await;
    let state = store.messages.get();
    assert_eq!(
        state.conversations[0]
            .last_message
            .as_ref()
            .map(|m| m.id.as_str()),
        Some("m1")
    );
}

#[tokio::test]
async fn duplicate_message_events_do_not_duplicate_state() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");

    let payload = wire(&message("m1", "c1", "u2"));
    socket
        .push(RawSocketEvent::new("new-message", payload.clone()))
        .await;
    socket.push(RawSocketEvent::new("new-message", payload)).await;

    wait_for(|| !store.messages.get().messages.is_empty()).await;
    settle().await;
    assert_eq!(store.messages.get().messages.len(), 1);
}

#[tokio::test]
async fn typing_events_maintain_the_typing_set() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");

    let start = json!({"conversationId": "c1", "userId": "u2"});
    socket
        .push(RawSocketEvent::new("typing-start", start.clone()))
        .await;
    socket.push(RawSocketEvent::new("typing-start", start)).await;

    let c1 = ConversationId::from("c1");
    wait_for(|| !store.messages.get().typing_in(&c1).is_empty()).await;
    settle().await;
    assert_eq!(store.messages.get().typing_in(&c1), [UserId::from("u2")]);

    socket
        .push(RawSocketEvent::new(
            "typing-stop",
            json!({"conversationId": "c1", "userId": "u2"}),
        ))
        .await;
    wait_for(|| store.messages.get().typing_in(&c1).is_empty()).await;
}

#[tokio::test]
async fn message_read_event_marks_the_conversation() {
    let (store, socket, bridge) = harness();
    store.messages.mutate(|m| {
        let mut summary = conversation("c1");
        summary.unread_count = 2;
        m.conversations.push(summary);
        m.add_message(message("m1", "c1", "u2"));
    });
    bridge.connect("tok").await.expect("connect");

    socket
        .push(RawSocketEvent::new(
            "message-read",
            json!({"conversationId": "c1"}),
        ))
        .await;

    wait_for(|| store.messages.get().conversations[0].unread_count == 0).await;
    assert!(store.messages.get().messages[0].is_read);
}

#[tokio::test]
async fn notification_events_feed_the_unread_aggregate() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");

    socket
        .push(RawSocketEvent::new(
            "new-notification",
            wire(&notification("n1", false)),
        ))
        .await;

    wait_for(|| store.notifications.get().unread_count == 1).await;
    assert_eq!(store.notifications.get().notifications.len(), 1);
}

#[tokio::test]
async fn incoming_call_event_rings_the_call_store() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");

    socket
        .push(RawSocketEvent::new(
            "incoming-call",
            json!({
                "callId": "call-1",
                "from": wire(&user("u2")),
                "offer": {"sdp": "v=0", "type": "offer"},
                "callType": "audio"
            }),
        ))
        .await;

    wait_for(|| store.call.get().incoming_call.is_some()).await;
    let call = store.call.get().incoming_call.expect("incoming call");
    assert_eq!(call.call_id.as_str(), "call-1");
}

#[tokio::test]
async fn malformed_and_unknown_events_are_dropped_without_mutation() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");
    let before = store.snapshot();

    socket
        .push(RawSocketEvent::new("new-message", json!({"_id": 42})))
        .await;
    socket
        .push(RawSocketEvent::new("server-maintenance", json!({})))
        .await;
    // A decodable event after the bad ones proves the pump survived them.
    socket
        .push(RawSocketEvent::new(
            "new-notification",
            wire(&notification("n1", true)),
        ))
        .await;

    wait_for(|| store.notifications.get().notifications.len() == 1).await;
    assert_eq!(store.messages.get().messages.len(), before.messages.messages.len());
}

#[tokio::test]
async fn teardown_is_symmetric_no_dispatch_after_disconnect() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");

    socket
        .push(RawSocketEvent::new("new-message", wire(&message("m1", "c1", "u2"))))
        .await;
    wait_for(|| store.messages.get().messages.len() == 1).await;

    bridge.disconnect().await;
    assert_eq!(bridge.status().get(), ConnectionStatus::Disconnected);
    assert_eq!(socket.disconnect_count(), 1);

    // The transport-side sender is gone; even if an event were in flight,
    // the pump is stopped, so nothing lands in the store.
    let delivered = socket
        .try_push(RawSocketEvent::new(
            "new-message",
            wire(&message("m2", "c1", "u2")),
        ))
        .await;
    assert!(!delivered);
    settle().await;
    assert_eq!(store.messages.get().messages.len(), 1);
}

#[tokio::test]
async fn status_walks_the_connection_state_machine() {
    let (_store, socket, bridge) = harness();
    assert_eq!(bridge.status().get(), ConnectionStatus::Disconnected);

    let mut status_sub = bridge.status().subscribe();
    bridge.connect("tok").await.expect("connect");
    assert_eq!(bridge.status().get(), ConnectionStatus::Connected);
    // The subscription coalesces Connecting into the latest phase but the
    // version counter shows both transitions committed.
    assert!(status_sub.poll().is_some());

    bridge.disconnect().await;
    assert_eq!(bridge.status().get(), ConnectionStatus::Disconnected);
    let _ = socket;
}

#[tokio::test]
async fn failed_connect_returns_to_disconnected() {
    let (_store, socket, bridge) = harness();
    socket.refuse_next_connect(SocketError::Unauthorized("bad token".into()));

    let result = bridge.connect("tok").await;
    assert!(matches!(result, Err(SocketError::Unauthorized(_))));
    assert_eq!(bridge.status().get(), ConnectionStatus::Disconnected);
    assert_eq!(socket.connect_count(), 0);
}

#[tokio::test]
async fn transport_stream_end_transitions_to_disconnected() {
    let (_store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");

    socket.drop_connection();
    wait_for(|| bridge.status().get() == ConnectionStatus::Disconnected).await;
}

#[tokio::test]
async fn explicit_reconnect_after_transport_loss_succeeds() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");
    socket.drop_connection();
    wait_for(|| bridge.status().get() == ConnectionStatus::Disconnected).await;

    // Reconnection policy lives above this layer; an explicit connect
    // after the transport gave up must open a fresh connection.
    bridge.connect("tok").await.expect("reconnect");
    assert_eq!(socket.connect_count(), 2);
    assert_eq!(bridge.status().get(), ConnectionStatus::Connected);

    socket
        .push(RawSocketEvent::new(
            "new-notification",
            wire(&notification("n1", false)),
        ))
        .await;
    wait_for(|| store.notifications.get().unread_count == 1).await;
}

#[tokio::test]
async fn redundant_connects_register_translations_once() {
    let (store, socket, bridge) = harness();
    bridge.connect("tok").await.expect("connect");
    bridge.connect("tok").await.expect("redundant connect");
    assert_eq!(socket.connect_count(), 1);

    // One event, one dispatch - a stacked handler would double-count the
    // unread aggregate.
    socket
        .push(RawSocketEvent::new(
            "new-notification",
            wire(&notification("n1", false)),
        ))
        .await;
    wait_for(|| store.notifications.get().unread_count == 1).await;
    settle().await;
    assert_eq!(store.notifications.get().unread_count, 1);
}

#[tokio::test]
async fn auth_transitions_drive_the_lifecycle() {
    let (_store, socket, bridge) = harness();

    bridge
        .handle_auth_change(Some("tok"))
        .await
        .expect("connect on credentials");
    assert_eq!(bridge.status().get(), ConnectionStatus::Connected);
    assert_eq!(socket.connect_count(), 1);

    bridge
        .handle_auth_change(Some("tok"))
        .await
        .expect("redundant credentials");
    assert_eq!(socket.connect_count(), 1);

    bridge
        .handle_auth_change(None)
        .await
        .expect("disconnect on logout");
    assert_eq!(bridge.status().get(), ConnectionStatus::Disconnected);
    assert_eq!(socket.disconnect_count(), 1);
}
