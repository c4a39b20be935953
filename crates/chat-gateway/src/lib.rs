//! # chat-gateway
//!
//! WebSocket gateway for real-time chat: the registry of live connections,
//! the per-connection session state machine, broadcast fan-out, and the
//! upgrade endpoint.
//!
//! ## Example
//!
//! ```ignore
//! use chat_gateway::{create_router, ConnectionRegistry, GatewayState};
//!
//! let state = GatewayState::from_context(&ctx, ConnectionRegistry::new_shared(), config.websocket);
//! let app = create_router().with_state(state);
//! ```

pub mod broadcast;
pub mod connection;
pub mod error;
pub mod server;
pub mod session;

#[cfg(test)]
mod testing;

pub use broadcast::{BroadcastReport, DeliveryError, DeliveryFailure};
pub use connection::{
    ConnectionRegistry, FrameStream, RegistryError, SharedTransport, Snapshot, Transport,
    TransportError,
};
pub use error::{GatewayError, GatewayResult};
pub use server::{create_app, create_router, GatewayState};
pub use session::{CloseReason, SessionEnd, SessionGateway, SessionPhase};
