//! Test doubles for gateway failure paths

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chat_core::{DomainError, Message, MessageRepository, RepoResult};
use chat_db::MemoryMessageRepository;

use crate::connection::{Transport, TransportError};

/// Message store that rejects copies for one recipient and can fail reads
#[derive(Default)]
pub struct FlakyMessageRepository {
    inner: MemoryMessageRepository,
    fail_for: Option<String>,
    fail_reads: bool,
}

impl FlakyMessageRepository {
    pub fn failing_for(recipient_id: &str) -> Self {
        Self {
            fail_for: Some(recipient_id.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &MemoryMessageRepository {
        &self.inner
    }
}

#[async_trait]
impl MessageRepository for FlakyMessageRepository {
    async fn save(&self, message: &Message) -> RepoResult<String> {
        if self.fail_for.as_deref() == Some(message.recipient_id.as_str()) {
            return Err(DomainError::DatabaseError("write rejected".to_string()));
        }
        self.inner.save(message).await
    }

    async fn find_by_recipient(&self, recipient_id: &str) -> RepoResult<Vec<Message>> {
        if self.fail_reads {
            return Err(DomainError::DatabaseError("read rejected".to_string()));
        }
        self.inner.find_by_recipient(recipient_id).await
    }
}

/// Transport whose writes always fail. Counts close calls.
#[derive(Debug, Default)]
pub struct BrokenTransport {
    closed: AtomicBool,
    close_calls: AtomicUsize,
}

impl BrokenTransport {
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for BrokenTransport {
    async fn send_text(&self, _payload: &str) -> Result<(), TransportError> {
        Err(TransportError::Io("broken pipe".to_string()))
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
