//! Gateway error types
//!
//! Failures raised before the upgrade are answered with the shared JSON
//! envelope; failures after it only end the session.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chat_cache::TokenError;
use chat_common::ErrorResponse;
use chat_core::DomainError;

use crate::connection::{RegistryError, TransportError};

/// Gateway error type
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Query parameter 'token' is missing")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Unable to upgrade connection: {0}")]
    Upgrade(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Persistence(#[from] DomainError),
}

impl GatewayError {
    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::BAD_REQUEST,
            Self::Token(_) => StatusCode::FORBIDDEN,
            Self::Upgrade(_) | Self::Registry(_) | Self::Transport(_) | Self::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Gateway error");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Connect request rejected");
        }

        let body = ErrorResponse::new(status.as_u16(), self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
