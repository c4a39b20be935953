//! Session gateway
//!
//! Owns the per-connection protocol: redeem the connect token, register the
//! connection, replay stored messages, then read frames until the client
//! goes away, broadcasting each one.

use std::sync::Arc;

use chat_cache::SharedTokenStore;
use chat_core::{MessageRepository, User, UserRepository};
use chat_service::ServiceContext;
use tracing::instrument;

use crate::broadcast::{fan_out, persist_offline};
use crate::connection::{ConnectionRegistry, FrameStream, SharedTransport, TransportError};
use crate::error::GatewayResult;

use super::guard::CleanupGuard;
use super::phase::SessionPhase;

/// Why the read loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The client closed the stream
    ClientClosed,
    /// Reading the next frame failed
    ReadError(TransportError),
}

/// Summary of a session that ran to the end of its read loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnd {
    pub connection_id: String,
    /// Inbound frames broadcast during the session
    pub frames: usize,
    pub reason: CloseReason,
}

/// Per-connection protocol driver shared by every session
#[derive(Clone)]
pub struct SessionGateway {
    registry: Arc<ConnectionRegistry>,
    tokens: SharedTokenStore,
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserRepository>,
}

impl SessionGateway {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        tokens: SharedTokenStore,
        messages: Arc<dyn MessageRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            registry,
            tokens,
            messages,
            users,
        }
    }

    /// Build a gateway over the stores held by `ctx`
    pub fn from_context(ctx: &ServiceContext, registry: Arc<ConnectionRegistry>) -> Self {
        Self::new(
            registry,
            Arc::clone(ctx.token_store()),
            ctx.message_repo_shared(),
            ctx.user_repo_shared(),
        )
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Redeem a connect token, returning its owner.
    ///
    /// The token is consumed whatever the outcome.
    pub fn authenticate(&self, token: &str) -> GatewayResult<User> {
        tracing::trace!(phase = %SessionPhase::Authenticating, "Redeeming connect token");

        match self.tokens.redeem(token) {
            Ok(owner) => Ok(owner),
            Err(e) => {
                tracing::debug!(error = %e, "Connect token rejected");
                Err(e.into())
            }
        }
    }

    /// Run a session for `owner` over an upgraded connection.
    ///
    /// Returns once the client closes the stream or a read fails. Errors
    /// from registration, backlog delivery or offline persistence end the
    /// session early. The connection is deregistered and its transport
    /// closed on every path, including cancellation.
    #[instrument(skip_all, fields(user_id = %owner.id, connection_id = tracing::field::Empty))]
    pub async fn serve<F>(
        &self,
        owner: User,
        transport: SharedTransport,
        mut frames: F,
    ) -> GatewayResult<SessionEnd>
    where
        F: FrameStream,
    {
        let connection_id = ConnectionRegistry::generate_id();
        tracing::Span::current().record("connection_id", connection_id.as_str());

        tracing::trace!(phase = %SessionPhase::Registering, "Registering connection");
        let registered =
            self.registry
                .add(connection_id.clone(), Arc::clone(&transport), owner.clone());

        if let Err(e) = registered {
            tracing::error!(error = %e, "Failed to register connection");
            transport.close();
            return Err(e.into());
        }

        let _guard = CleanupGuard::new(
            Arc::clone(&self.registry),
            connection_id.clone(),
            Arc::clone(&transport),
        );

        tracing::info!(username = %owner.username, "Session started");

        tracing::trace!(phase = %SessionPhase::BacklogDelivery, "Delivering backlog");
        let replayed = self.deliver_backlog(&owner, &transport).await?;
        if replayed > 0 {
            tracing::debug!(count = replayed, "Backlog delivered");
        }

        tracing::trace!(phase = %SessionPhase::Streaming, "Reading frames");
        let mut count = 0usize;

        let reason = loop {
            let payload = match frames.next_frame().await {
                None => break CloseReason::ClientClosed,
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "Failed to read frame");
                    break CloseReason::ReadError(e);
                }
                Some(Ok(payload)) => payload,
            };

            let snapshot = self.registry.snapshot();
            fan_out(&self.messages, &owner, &payload, &snapshot).await;
            persist_offline(
                self.users.as_ref(),
                self.messages.as_ref(),
                &owner,
                &payload,
                &snapshot,
            )
            .await?;

            count += 1;
        };

        tracing::trace!(phase = %SessionPhase::Closing, "Closing connection");
        tracing::info!(frames = count, reason = ?reason, "Session ended");

        Ok(SessionEnd {
            connection_id,
            frames: count,
            reason,
        })
    }

    /// Write every stored message for `owner`, oldest first
    async fn deliver_backlog(
        &self,
        owner: &User,
        transport: &SharedTransport,
    ) -> GatewayResult<usize> {
        let backlog = self.messages.find_by_recipient(&owner.id).await?;

        for message in &backlog {
            transport.send_text(&message.payload).await?;
        }

        Ok(backlog.len())
    }
}

impl std::fmt::Debug for SessionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGateway")
            .field("registry", &self.registry)
            .field("tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}
