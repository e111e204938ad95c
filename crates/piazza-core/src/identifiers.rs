//! Identifier newtypes for Piazza entities
//!
//! All identifiers are assigned by the server and opaque to the client; they
//! are carried as strings on the wire (the collaborators' `_id` fields) and
//! wrapped here so entity families cannot be mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a server-assigned identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// View the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

entity_id! {
    /// Identifies a user account.
    UserId
}

entity_id! {
    /// Identifies a post in the feed.
    PostId
}

entity_id! {
    /// Identifies a single chat message.
    MessageId
}

entity_id! {
    /// Identifies a conversation (direct or group).
    ConversationId
}

entity_id! {
    /// Identifies a notification.
    NotificationId
}

entity_id! {
    /// Identifies a call signaling session.
    CallId
}
