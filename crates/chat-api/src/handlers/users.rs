//! User handlers
//!
//! Registration, login, and the live-user views backed by the gateway
//! registry.

use axum::{extract::Host, extract::State, Json};
use chat_service::dto::{
    ActiveConnectionsResponse, ActiveUsersResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
use chat_service::AuthService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<RegisterResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login and receive a single-use WebSocket URL
///
/// POST /user/login
pub async fn login(
    State(state): State<AppState>,
    Host(host): Host,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Created<Json<LoginResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request, &host).await?;
    Ok(Created(Json(response)))
}

/// Users with a live gateway connection
///
/// GET /user/active
pub async fn active_users(State(state): State<AppState>) -> Json<ActiveUsersResponse> {
    Json(ActiveUsersResponse {
        users: state.registry().active_usernames(),
    })
}

/// Number of live gateway connections
///
/// GET /user/active/count
pub async fn active_count(State(state): State<AppState>) -> Json<ActiveConnectionsResponse> {
    Json(ActiveConnectionsResponse {
        count: state.registry().count(),
    })
}
