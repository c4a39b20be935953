//! Session cleanup

use std::sync::Arc;

use crate::connection::{ConnectionRegistry, SharedTransport};

use super::phase::SessionPhase;

/// Deregisters a connection and closes its transport when dropped.
///
/// Runs exactly once, whether the session returned, failed, panicked, or was
/// cancelled.
pub struct CleanupGuard {
    registry: Arc<ConnectionRegistry>,
    connection_id: String,
    transport: SharedTransport,
}

impl CleanupGuard {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        connection_id: impl Into<String>,
        transport: SharedTransport,
    ) -> Self {
        Self {
            registry,
            connection_id: connection_id.into(),
            transport,
        }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        match self.registry.remove(&self.connection_id) {
            Ok(record) => {
                tracing::debug!(
                    connection_id = %self.connection_id,
                    user_id = %record.owner.id,
                    "Connection deregistered"
                );
            }
            Err(e) => {
                tracing::warn!(
                    connection_id = %self.connection_id,
                    error = %e,
                    "Connection was already deregistered"
                );
            }
        }

        self.transport.close();

        tracing::trace!(
            connection_id = %self.connection_id,
            phase = %SessionPhase::Closed,
            "Connection closed"
        );
    }
}

impl std::fmt::Debug for CleanupGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupGuard")
            .field("connection_id", &self.connection_id)
            .finish()
    }
}
