//! Gateway server setup
//!
//! Routes for the WebSocket connect endpoint.

mod handler;
mod state;

pub use handler::{connect_handler, connect_token, QueryPairs};
pub use state::GatewayState;

use axum::extract::FromRef;
use axum::routing::get;
use axum::Router;
use chat_service::dto::CONNECT_PATH;

/// Create the gateway router.
///
/// Generic over the outer state so it can be merged into a larger app.
pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    GatewayState: FromRef<S>,
{
    Router::new().route(CONNECT_PATH, get(connect_handler))
}

/// Build a standalone gateway app
pub fn create_app(state: GatewayState) -> Router {
    create_router().with_state(state)
}
