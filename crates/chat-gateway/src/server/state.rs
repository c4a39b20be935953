//! Gateway state
//!
//! Shared dependencies for the connect endpoint.

use std::sync::Arc;

use chat_common::WebSocketConfig;
use chat_service::ServiceContext;

use crate::connection::ConnectionRegistry;
use crate::session::SessionGateway;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Session driver shared by every connection
    gateway: Arc<SessionGateway>,
    /// WebSocket limits
    websocket: Arc<WebSocketConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(gateway: SessionGateway, websocket: WebSocketConfig) -> Self {
        Self {
            gateway: Arc::new(gateway),
            websocket: Arc::new(websocket),
        }
    }

    /// Build the state over the stores held by `ctx`
    pub fn from_context(
        ctx: &ServiceContext,
        registry: Arc<ConnectionRegistry>,
        websocket: WebSocketConfig,
    ) -> Self {
        Self::new(SessionGateway::from_context(ctx, registry), websocket)
    }

    /// Get the session gateway
    pub fn gateway(&self) -> &Arc<SessionGateway> {
        &self.gateway
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        self.gateway.registry()
    }

    /// Get the WebSocket limits
    pub fn websocket(&self) -> &WebSocketConfig {
        &self.websocket
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("gateway", &self.gateway)
            .field("websocket", &self.websocket)
            .finish()
    }
}
