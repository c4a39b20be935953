//! In-memory implementation of MessageRepository

use async_trait::async_trait;
use dashmap::DashMap;

use chat_core::entities::Message;
use chat_core::traits::{MessageRepository, RepoResult};

/// In-memory message store keyed by recipient, in insertion order
#[derive(Debug, Default)]
pub struct MemoryMessageRepository {
    by_recipient: DashMap<String, Vec<Message>>,
}

impl MemoryMessageRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored messages
    pub fn len(&self) -> usize {
        self.by_recipient.iter().map(|entry| entry.len()).sum()
    }

    /// Check if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored message, grouped by recipient
    pub fn all(&self) -> Vec<Message> {
        self.by_recipient
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    async fn save(&self, message: &Message) -> RepoResult<String> {
        self.by_recipient
            .entry(message.recipient_id.clone())
            .or_default()
            .push(message.clone());
        Ok(message.id.clone())
    }

    async fn find_by_recipient(&self, recipient_id: &str) -> RepoResult<Vec<Message>> {
        Ok(self
            .by_recipient
            .get(recipient_id)
            .map(|messages| messages.clone())
            .unwrap_or_default())
    }
}
