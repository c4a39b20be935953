//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::Message;
use chat_core::error::DomainError;
use chat_core::traits::{MessageRepository, RepoResult};

use crate::models::MessageModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id, recipient_id = %message.recipient_id))]
    async fn save(&self, message: &Message) -> RepoResult<String> {
        let row = MessageModel::from(message);

        sqlx::query(
            r"
            INSERT INTO messages (id, sender_id, sender_name, recipient_id, payload, time)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&row.id)
        .bind(&row.sender_id)
        .bind(&row.sender_name)
        .bind(&row.recipient_id)
        .bind(&row.payload)
        .bind(row.time)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateMessage(row.id.clone())))?;

        Ok(row.id)
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(&self, recipient_id: &str) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, sender_id, sender_name, recipient_id, payload, time
            FROM messages
            WHERE recipient_id = $1
            ORDER BY seq
            ",
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }
}
