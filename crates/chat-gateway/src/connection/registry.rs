//! Connection registry
//!
//! The in-memory table of live connections. Every operation runs under one
//! mutex and only touches the map, so snapshots are never torn by a
//! concurrent add or remove.

use std::collections::HashMap;
use std::sync::Arc;

use chat_core::User;
use parking_lot::Mutex;
use thiserror::Error;

use super::transport::SharedTransport;

/// Registry integrity errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplication of connection id: {0}")]
    Conflict(String),

    #[error("connection with provided id not found: {0}")]
    NotFound(String),
}

/// A live connection
#[derive(Clone)]
pub struct ConnectionRecord {
    pub owner: User,
    pub transport: SharedTransport,
}

impl std::fmt::Debug for ConnectionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRecord")
            .field("owner", &self.owner)
            .field("transport", &"...")
            .finish()
    }
}

/// Point-in-time copy of the registry keyed by owning user id
pub type Snapshot = HashMap<String, SharedTransport>;

/// Thread-safe table of live connections
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<String, ConnectionRecord>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Generate a fresh connection id
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Register a connection. An existing record with the same id is left
    /// untouched and `Conflict` is returned.
    pub fn add(
        &self,
        connection_id: impl Into<String>,
        transport: SharedTransport,
        owner: User,
    ) -> Result<(), RegistryError> {
        let connection_id = connection_id.into();
        let mut connections = self.connections.lock();

        if connections.contains_key(&connection_id) {
            return Err(RegistryError::Conflict(connection_id));
        }

        tracing::debug!(connection_id = %connection_id, user_id = %owner.id, "Connection added");
        connections.insert(connection_id, ConnectionRecord { owner, transport });
        Ok(())
    }

    /// Deregister a connection, returning its record
    pub fn remove(&self, connection_id: &str) -> Result<ConnectionRecord, RegistryError> {
        let record = self
            .connections
            .lock()
            .remove(connection_id)
            .ok_or_else(|| RegistryError::NotFound(connection_id.to_string()))?;

        tracing::debug!(connection_id = %connection_id, user_id = %record.owner.id, "Connection removed");
        Ok(record)
    }

    /// Number of live connections
    pub fn count(&self) -> usize {
        self.connections.lock().len()
    }

    /// `<userId>-<username>` for every live connection, in no particular order
    pub fn active_usernames(&self) -> Vec<String> {
        let owners: Vec<User> = self
            .connections
            .lock()
            .values()
            .map(|record| record.owner.clone())
            .collect();

        owners.iter().map(User::active_label).collect()
    }

    /// Copy the registry as `user id -> transport`
    pub fn snapshot(&self) -> Snapshot {
        self.connections
            .lock()
            .values()
            .map(|record| (record.owner.id.clone(), Arc::clone(&record.transport)))
            .collect()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::channel_transport;

    fn transport() -> SharedTransport {
        let (transport, _frames, _peer) = channel_transport();
        transport
    }

    #[test]
    fn test_duplicate_id_conflicts() {
        let registry = ConnectionRegistry::new();
        let u1 = User::new("u1", "alice");
        let u2 = User::new("u2", "bob");

        registry.add("c1", transport(), u1).unwrap();
        let err = registry.add("c1", transport(), u2).unwrap_err();

        assert_eq!(err, RegistryError::Conflict("c1".to_string()));
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.active_usernames(), vec!["u1-alice".to_string()]);
    }

    #[test]
    fn test_remove_absent_id() {
        let registry = ConnectionRegistry::new();
        registry
            .add("c1", transport(), User::new("u1", "alice"))
            .unwrap();

        let err = registry.remove("missing").unwrap_err();
        assert_eq!(err, RegistryError::NotFound("missing".to_string()));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_remove_then_readd() {
        let registry = ConnectionRegistry::new();
        registry
            .add("c1", transport(), User::new("u1", "alice"))
            .unwrap();

        let record = registry.remove("c1").unwrap();
        assert_eq!(record.owner.username, "alice");
        assert_eq!(registry.count(), 0);
        assert!(registry.remove("c1").is_err());

        registry
            .add("c1", transport(), User::new("u2", "bob"))
            .unwrap();
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_snapshot_keyed_by_user() {
        let registry = ConnectionRegistry::new();
        registry
            .add("c1", transport(), User::new("u1", "alice"))
            .unwrap();
        registry
            .add("c2", transport(), User::new("u2", "bob"))
            .unwrap();

        let snapshot = registry.snapshot();
        let mut users: Vec<_> = snapshot.keys().cloned().collect();
        users.sort();
        assert_eq!(users, vec!["u1".to_string(), "u2".to_string()]);

        // Later changes do not leak into an existing snapshot
        registry.remove("c1").unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn test_active_usernames() {
        let registry = ConnectionRegistry::new();
        registry
            .add("c1", transport(), User::new("u1", "alice"))
            .unwrap();
        registry
            .add("c2", transport(), User::new("u2", "bob"))
            .unwrap();

        let mut names = registry.active_usernames();
        names.sort();
        assert_eq!(names, vec!["u1-alice".to_string(), "u2-bob".to_string()]);
    }

    #[test]
    fn test_concurrent_adds_same_id() {
        let registry = ConnectionRegistry::new_shared();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.add("shared", transport(), User::new(format!("u{i}"), "user"))
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(
            ConnectionRegistry::generate_id(),
            ConnectionRegistry::generate_id()
        );
    }
}
