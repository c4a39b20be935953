//! Message entity - one addressed copy of a chat message

use chrono::Utc;

use super::User;

/// A chat message addressed to a single recipient.
///
/// The gateway creates one copy per broadcast target and one per offline
/// recipient. Copies are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub recipient_id: String,
    pub payload: String,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

impl Message {
    /// Create a new message from `sender` to `recipient_id`, stamped now
    pub fn new(
        id: impl Into<String>,
        sender: &User,
        recipient_id: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender_id: sender.id.clone(),
            sender_name: sender.username.clone(),
            recipient_id: recipient_id.into(),
            payload: payload.into(),
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Check whether this copy is addressed to `user_id`
    #[inline]
    pub fn is_for(&self, user_id: &str) -> bool {
        self.recipient_id == user_id
    }
}
