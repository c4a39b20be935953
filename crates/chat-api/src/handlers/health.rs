//! Health check handler

use axum::Json;
use chat_service::dto::HealthResponse;

/// Liveness check
///
/// GET /_health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
