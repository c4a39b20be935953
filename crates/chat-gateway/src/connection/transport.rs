//! Transport abstraction
//!
//! A connection is split into a write half shared by everyone who sends to
//! it ([`Transport`]) and a read half owned by the session loop
//! ([`FrameStream`]).

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Transport failures on an established connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection is closed")]
    Closed,

    #[error("transport error: {0}")]
    Io(String),
}

/// Write half of a connection
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one text frame
    async fn send_text(&self, payload: &str) -> Result<(), TransportError>;

    /// Close the connection. Idempotent, never blocks.
    fn close(&self);

    /// Check if `close` has been called
    fn is_closed(&self) -> bool;
}

/// Shared write half
pub type SharedTransport = Arc<dyn Transport>;

/// Read half of a connection
#[async_trait]
pub trait FrameStream: Send {
    /// Wait for the next chat payload.
    ///
    /// `None` means the peer closed the stream normally.
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>>;
}
