//! WebSocket transport
//!
//! The socket's sink is owned by a writer task fed through a bounded
//! channel, so any number of broadcasters can write to one connection
//! without sharing the sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use super::transport::{FrameStream, Transport, TransportError};

/// Close code sent when the gateway ends a session
const NORMAL_CLOSURE: u16 = 1000;

/// Write half of an upgraded WebSocket
pub struct WsTransport {
    outbound: mpsc::Sender<Message>,
    writer: JoinHandle<()>,
    closed: AtomicBool,
}

impl WsTransport {
    /// Spawn the writer task for `sink` with an outbound queue of `buffer` frames
    pub fn spawn(mut sink: SplitSink<WebSocket, Message>, buffer: usize) -> Arc<Self> {
        let (tx, mut rx) = mpsc::channel::<Message>(buffer.max(1));

        let writer = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let is_close = matches!(message, Message::Close(_));

                if let Err(e) = sink.send(message).await {
                    tracing::debug!(error = %e, "Failed to write to WebSocket");
                    break;
                }

                if is_close {
                    break;
                }
            }

            let _ = sink.close().await;
        });

        Arc::new(Self {
            outbound: tx,
            writer,
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Transport for WsTransport {
    /// Queue a text frame. Waits while the outbound queue is full.
    async fn send_text(&self, payload: &str) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        self.outbound
            .send(Message::Text(payload.into()))
            .await
            .map_err(|_| TransportError::Closed)
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let frame = Message::Close(Some(CloseFrame {
            code: NORMAL_CLOSURE,
            reason: "".into(),
        }));

        match self.outbound.try_send(frame) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            // A stalled client must not hold the socket open
            Err(TrySendError::Full(_)) => self.writer.abort(),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for WsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsTransport")
            .field("closed", &self.is_closed())
            .field("queued", &(self.outbound.max_capacity() - self.outbound.capacity()))
            .finish()
    }
}

/// Read half of an upgraded WebSocket
pub struct WsFrames {
    stream: SplitStream<WebSocket>,
}

impl WsFrames {
    pub fn new(stream: SplitStream<WebSocket>) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl FrameStream for WsFrames {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.to_string())),
                Ok(Message::Binary(bytes)) => {
                    return Some(Ok(String::from_utf8_lossy(&bytes).into_owned()));
                }
                // Pings are answered by tungstenite
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => return None,
                Err(e) => return Some(Err(TransportError::Io(e.to_string()))),
            }
        }
    }
}
