//! Service context - dependency container for services
//!
//! Holds the repositories and the token store shared by the REST handlers
//! and the WebSocket gateway.

use std::sync::Arc;

use chat_cache::SharedTokenStore;
use chat_core::traits::{MessageRepository, UserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    message_repo: Arc<dyn MessageRepository>,

    // Ephemeral stores
    token_store: SharedTokenStore,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        message_repo: Arc<dyn MessageRepository>,
        token_store: SharedTokenStore,
    ) -> Self {
        Self {
            user_repo,
            message_repo,
            token_store,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Shared handle to the user repository
    pub fn user_repo_shared(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.user_repo)
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Shared handle to the message repository
    pub fn message_repo_shared(&self) -> Arc<dyn MessageRepository> {
        Arc::clone(&self.message_repo)
    }

    // === Ephemeral Stores ===

    /// Get the login token store
    pub fn token_store(&self) -> &SharedTokenStore {
        &self.token_store
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("token_store", &self.token_store)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    token_store: Option<SharedTokenStore>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn token_store(mut self, store: SharedTokenStore) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.token_store
                .ok_or_else(|| ServiceError::validation("token_store is required"))?,
        ))
    }
}
