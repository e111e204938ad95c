//! Notification feed state
//!
//! The unread count is a derived aggregate maintained incrementally. It is
//! never recomputed by scanning the list, so every mutation must go through
//! the operations here; a caller bypassing them (say, a batch import poking
//! the list directly) would desynchronize the counter.

use piazza_core::{Notification, NotificationId};
use serde::{Deserialize, Serialize};

/// State of the notification surface.
///
/// Invariant, after every operation: `unread_count` equals the number of
/// held notifications with `is_read == false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationsState {
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Incrementally maintained unread aggregate.
    pub unread_count: u32,
    /// A notification fetch is in flight.
    pub is_loading: bool,
    /// Last fetch failure, as user-facing text.
    pub error: Option<String>,
}

impl NotificationsState {
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

    /// Prepend a notification; counts toward unread only if not yet read.
    pub fn add_notification(&mut self, notification: Notification) {
        if !notification.is_read {
            self.unread_count = self.unread_count.saturating_add(1);
        }
        self.notifications.insert(0, notification);
    }

    /// Replace a notification by id, moving the counter with the read-flag
    /// delta in the same transition. Unknown ids are a no-op.
    pub fn update_notification(&mut self, notification: Notification) {
        let Some(index) = self
            .notifications
            .iter()
            .position(|n| n.id == notification.id)
        else {
            return;
        };
        let was_unread = !self.notifications[index].is_read;
        let is_unread = !notification.is_read;
        if was_unread && !is_unread {
            self.unread_count = self.unread_count.saturating_sub(1);
        } else if !was_unread && is_unread {
            self.unread_count = self.unread_count.saturating_add(1);
        }
        self.notifications[index] = notification;
    }

    /// Remove a notification by id, releasing its unread contribution.
    /// Absent ids are a no-op.
    pub fn remove_notification(&mut self, id: &NotificationId) {
        if let Some(index) = self.notifications.iter().position(|n| n.id == *id) {
            if !self.notifications[index].is_read {
                self.unread_count = self.unread_count.saturating_sub(1);
            }
            self.notifications.remove(index);
        }
    }

    /// Commit a fetched feed wholesale (list and server-computed count).
    pub fn apply_feed(&mut self, notifications: Vec<Notification>, unread_count: u32) {
        self.is_loading = false;
        self.notifications = notifications;
        self.unread_count = unread_count;
    }

    /// Flip one notification to read, decrementing only when it was unread.
    /// Flag and counter move in one transition.
    pub fn mark_read(&mut self, id: &NotificationId) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == *id) {
            if !notification.is_read {
                notification.is_read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
            }
        }
    }

    /// Flip every notification to read and zero the counter.
    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.unread_count = 0;
    }

    /// Drop everything (used on logout).
    pub fn clear(&mut self) {
        self.notifications.clear();
        self.unread_count = 0;
    }
}
