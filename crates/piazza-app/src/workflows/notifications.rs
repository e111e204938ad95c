//! Notification workflows

use crate::bridge::{RestBridge, RestError};
use crate::state::ToastLevel;
use crate::store::AppStore;
use piazza_core::NotificationId;

const FETCH_NOTIFICATIONS_FAILED: &str = "Failed to fetch notifications";
const MARK_READ_FAILED: &str = "Failed to mark as read";
const MARK_ALL_READ_FAILED: &str = "Failed to mark all as read";

/// Load the notification feed, committing the server's envelope wholesale.
pub async fn fetch_notifications(store: &AppStore, rest: &dyn RestBridge) -> Result<(), RestError> {
    store.notifications.mutate(|n| n.begin_loading());
    match rest.notifications().await {
        Ok(feed) => {
            store
                .notifications
                .mutate(|n| n.apply_feed(feed.notifications, feed.unread_count));
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(FETCH_NOTIFICATIONS_FAILED).to_owned();
            store.notifications.mutate(|n| n.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Mark one notification read. On success the local read flag and the
/// unread aggregate move in one transition.
pub async fn mark_notification_read(
    store: &AppStore,
    rest: &dyn RestBridge,
    id: &NotificationId,
) -> Result<(), RestError> {
    store.notifications.mutate(|n| n.begin_loading());
    match rest.mark_notification_read(id).await {
        Ok(()) => {
            store.notifications.mutate(|n| {
                n.is_loading = false;
                n.mark_read(id);
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(MARK_READ_FAILED).to_owned();
            store.notifications.mutate(|n| n.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Mark every notification read and zero the aggregate.
pub async fn mark_all_notifications_read(
    store: &AppStore,
    rest: &dyn RestBridge,
) -> Result<(), RestError> {
    store.notifications.mutate(|n| n.begin_loading());
    match rest.mark_all_notifications_read().await {
        Ok(()) => {
            store.notifications.mutate(|n| {
                n.is_loading = false;
                n.mark_all_read();
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(MARK_ALL_READ_FAILED).to_owned();
            store.notifications.mutate(|n| n.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}
