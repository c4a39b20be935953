//! Route definitions

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::handlers::{health, users};
use crate::response::ApiError;
use crate::state::AppState;

/// Create the main router: account routes, the gateway connect endpoint,
/// and the health check
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(chat_gateway::create_router())
        .route("/_health", get(health::health_check))
        .fallback(not_found)
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(users::register))
        .route("/user/login", post(users::login))
        .route("/user/active", get(users::active_users))
        .route("/user/active/count", get(users::active_count))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
