//! In-process transport
//!
//! A connection backed by unbounded channels instead of a socket. The
//! [`ChannelPeer`] plays the remote client: it pushes inbound frames and
//! observes what the gateway wrote.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::transport::{FrameStream, Transport, TransportError};

/// Write half of an in-process connection
#[derive(Debug)]
pub struct ChannelTransport {
    outbound: mpsc::UnboundedSender<String>,
    closed: AtomicBool,
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send_text(&self, payload: &str) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        self.outbound
            .send(payload.to_string())
            .map_err(|_| TransportError::Closed)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Read half of an in-process connection
#[derive(Debug)]
pub struct ChannelFrames {
    inbound: mpsc::UnboundedReceiver<Result<String, TransportError>>,
}

#[async_trait]
impl FrameStream for ChannelFrames {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        self.inbound.recv().await
    }
}

/// The remote end of an in-process connection
#[derive(Debug)]
pub struct ChannelPeer {
    inbound: Option<mpsc::UnboundedSender<Result<String, TransportError>>>,
    outbound: mpsc::UnboundedReceiver<String>,
    transport: Arc<ChannelTransport>,
}

impl ChannelPeer {
    /// Deliver a chat frame to the gateway
    pub fn send(&self, payload: impl Into<String>) {
        if let Some(inbound) = &self.inbound {
            let _ = inbound.send(Ok(payload.into()));
        }
    }

    /// Make the gateway's next read fail
    pub fn fail(&self, error: TransportError) {
        if let Some(inbound) = &self.inbound {
            let _ = inbound.send(Err(error));
        }
    }

    /// End the inbound stream, as a client close would
    pub fn hang_up(&mut self) {
        self.inbound = None;
    }

    /// Wait for the next frame the gateway wrote
    pub async fn recv(&mut self) -> Option<String> {
        self.outbound.recv().await
    }

    /// Take a frame the gateway already wrote, without waiting
    pub fn try_recv(&mut self) -> Option<String> {
        self.outbound.try_recv().ok()
    }

    /// Check if the gateway closed this connection
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}

/// Create a connected transport, frame stream, and peer
pub fn channel_transport() -> (Arc<ChannelTransport>, ChannelFrames, ChannelPeer) {
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

    let transport = Arc::new(ChannelTransport {
        outbound: outbound_tx,
        closed: AtomicBool::new(false),
    });

    let peer = ChannelPeer {
        inbound: Some(inbound_tx),
        outbound: outbound_rx,
        transport: Arc::clone(&transport),
    };

    (
        transport,
        ChannelFrames {
            inbound: inbound_rx,
        },
        peer,
    )
}
