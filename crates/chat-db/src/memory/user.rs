//! In-memory implementation of UserRepository

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use chat_core::entities::User;
use chat_core::error::DomainError;
use chat_core::traits::{RepoResult, UserRepository};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
    seq: u64,
}

/// In-memory user directory
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: DashMap<String, StoredUser>,
    /// username -> user id
    names: DashMap<String, String>,
    next_seq: std::sync::atomic::AtomicU64,
}

impl MemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if no users are registered
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.users.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let Some(id) = self.names.get(username).map(|id| id.clone()) else {
            return Ok(None);
        };
        self.find_by_id(&id).await
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        match self.names.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(DomainError::UsernameTaken),
            Entry::Vacant(slot) => {
                let seq = self
                    .next_seq
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                self.users.insert(
                    user.id.clone(),
                    StoredUser {
                        user: user.clone(),
                        password_hash: password_hash.to_string(),
                        seq,
                    },
                );
                slot.insert(user.id.clone());
                Ok(())
            }
        }
    }

    async fn get_password_hash(&self, id: &str) -> RepoResult<Option<String>> {
        Ok(self.users.get(id).map(|stored| stored.password_hash.clone()))
    }

    async fn find_not_in_ids(&self, ids: &[String]) -> RepoResult<Vec<User>> {
        let excluded: HashSet<&str> = ids.iter().map(String::as_str).collect();

        let mut found: Vec<(u64, User)> = self
            .users
            .iter()
            .filter(|entry| !excluded.contains(entry.key().as_str()))
            .map(|entry| (entry.seq, entry.user.clone()))
            .collect();
        found.sort_by_key(|(seq, _)| *seq);

        Ok(found.into_iter().map(|(_, user)| user).collect())
    }
}
