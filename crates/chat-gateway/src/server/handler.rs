//! Connect handler
//!
//! Redeems the token from the query string, upgrades the connection and
//! hands the socket to the session gateway.

use axum::extract::rejection::QueryRejection;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use chat_core::User;
use futures_util::StreamExt;
use std::sync::Arc;

use crate::connection::{WsFrames, WsTransport};
use crate::error::{GatewayError, GatewayResult};
use crate::server::GatewayState;
use crate::session::SessionGateway;

/// Raw query string pairs, in order
pub type QueryPairs = Vec<(String, String)>;

/// Value of the first `token` pair, if non-empty. Later duplicates are ignored.
pub fn connect_token(pairs: QueryPairs) -> Option<String> {
    pairs
        .into_iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value)
        .filter(|token| !token.is_empty())
}

/// Upgrade endpoint.
///
/// The token is checked before the upgrade so that a rejected client gets a
/// plain HTTP error envelope.
pub async fn connect_handler(
    State(state): State<GatewayState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> GatewayResult<Response> {
    let token = query
        .ok()
        .and_then(|Query(pairs)| connect_token(pairs))
        .ok_or(GatewayError::MissingToken)?;

    let owner = state.gateway().authenticate(&token)?;

    let ws = ws.map_err(|e| GatewayError::Upgrade(e.body_text()))?;

    let limits = state.websocket();
    let buffer = limits.outbound_buffer;
    let gateway = Arc::clone(state.gateway());

    tracing::debug!(user_id = %owner.id, "Upgrading connection");

    Ok(ws
        .max_message_size(limits.max_message_size)
        .max_frame_size(limits.max_message_size)
        .on_failed_upgrade(|e| {
            tracing::warn!(error = %e, "WebSocket upgrade failed");
        })
        .on_upgrade(move |socket| run_session(gateway, owner, socket, buffer)))
}

/// Drive an upgraded socket until its session ends
async fn run_session(gateway: Arc<SessionGateway>, owner: User, socket: WebSocket, buffer: usize) {
    let (sink, stream) = socket.split();
    let transport = WsTransport::spawn(sink, buffer);

    if let Err(e) = gateway
        .serve(owner, transport, WsFrames::new(stream))
        .await
    {
        tracing::warn!(error = %e, "Session ended with error");
    }
}
