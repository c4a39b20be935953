//! Token store with TTL and destructive redemption.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration as StdDuration;

use chat_core::User;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Errors returned by [`TokenStore::redeem`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token not found")]
    NotFound,

    #[error("token has been expired")]
    Expired,
}

/// A stored token entry
#[derive(Debug, Clone)]
pub struct TokenRecord {
    pub owner: User,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// A record is expired once `now` has reached its expiry instant
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Shared token store handle
pub type SharedTokenStore = Arc<TokenStore>;

/// Thread-safe map from token value to its owner and expiry.
///
/// Every redemption removes the entry before looking at it, so a value can be
/// redeemed at most once even when callers race on it.
pub struct TokenStore {
    entries: Mutex<HashMap<String, TokenRecord>>,
    ttl: Duration,
}

impl TokenStore {
    /// Create a store whose tokens live for `ttl`. A negative ttl issues
    /// tokens that are already expired.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a new shared store
    pub fn new_shared(ttl: Duration) -> SharedTokenStore {
        Arc::new(Self::new(ttl))
    }

    /// Configured token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `token` for `owner`, replacing any entry with the same value
    pub fn issue(&self, token: impl Into<String>, owner: User) {
        let token = token.into();
        let expires_at = Utc::now() + self.ttl;

        tracing::debug!(user_id = %owner.id, expires_at = %expires_at, "Token issued");

        self.entries
            .lock()
            .insert(token, TokenRecord { owner, expires_at });
    }

    /// Generate a fresh random token for `owner` and store it
    pub fn issue_new(&self, owner: User) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.issue(token.clone(), owner);
        token
    }

    /// Consume `token`, returning its owner if it had not expired.
    ///
    /// The entry is removed whatever the outcome.
    pub fn redeem(&self, token: &str) -> Result<User, TokenError> {
        let record = self.entries.lock().remove(token).ok_or(TokenError::NotFound)?;

        if record.is_expired_at(Utc::now()) {
            tracing::debug!(user_id = %record.owner.id, "Expired token redeemed");
            return Err(TokenError::Expired);
        }

        Ok(record.owner)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, record| !record.is_expired_at(now));
        before - entries.len()
    }

    /// Number of outstanding tokens
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if no tokens are outstanding
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Spawn a background task purging expired tokens every `interval`.
    ///
    /// The task holds a weak reference and stops once the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: StdDuration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let Some(store) = store.upgrade() else {
                    tracing::debug!("Token store dropped, sweeper exiting");
                    break;
                };

                let purged = store.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged = purged, remaining = store.len(), "Expired tokens purged");
                }
            }
        })
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
