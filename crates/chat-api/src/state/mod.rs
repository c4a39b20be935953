//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the gateway, and configuration.

use std::sync::Arc;

use axum::extract::FromRef;
use chat_common::AppConfig;
use chat_gateway::{ConnectionRegistry, GatewayState};
use chat_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// WebSocket gateway sharing the same stores
    gateway: GatewayState,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState, wiring a fresh connection registry into the gateway
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let gateway = GatewayState::from_context(
            &service_context,
            ConnectionRegistry::new_shared(),
            config.websocket.clone(),
        );

        Self {
            service_context: Arc::new(service_context),
            gateway,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the gateway state
    pub fn gateway(&self) -> &GatewayState {
        &self.gateway
    }

    /// Get the live connection registry
    pub fn registry(&self) -> &ConnectionRegistry {
        self.gateway.registry()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl FromRef<AppState> for GatewayState {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("gateway", &self.gateway)
            .field("config", &"AppConfig")
            .finish()
    }
}
