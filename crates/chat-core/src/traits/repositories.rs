//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL for production, in-memory for
//! tests and database-less runs).

use async_trait::async_trait;

use crate::entities::{Message, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// The user directory: account lookup and presence-independent listing
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Create a new user. Fails with `UsernameTaken` if the name is in use.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: &str) -> RepoResult<Option<String>>;

    /// List every user whose id is not in `ids`
    async fn find_not_in_ids(&self, ids: &[String]) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// The message store: durable per-recipient message copies
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message, returning its id
    async fn save(&self, message: &Message) -> RepoResult<String>;

    /// List messages addressed to `recipient_id`, oldest first
    async fn find_by_recipient(&self, recipient_id: &str) -> RepoResult<Vec<Message>>;
}
