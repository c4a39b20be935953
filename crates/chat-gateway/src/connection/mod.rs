//! Connection management
//!
//! The registry of live connections and the transports they write through.

mod channel;
mod registry;
mod transport;
mod websocket;

pub use channel::{channel_transport, ChannelFrames, ChannelPeer, ChannelTransport};
pub use registry::{ConnectionRecord, ConnectionRegistry, RegistryError, Snapshot};
pub use transport::{FrameStream, SharedTransport, Transport, TransportError};
pub use websocket::{WsFrames, WsTransport};
