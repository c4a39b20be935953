//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use serde::{Deserialize, Serialize};

/// Path of the WebSocket upgrade endpoint
pub const CONNECT_PATH: &str = "/chat/ws.rtm.start";

/// Build the WebSocket URL a client uses to connect with `token`
pub fn connect_url(host: &str, token: &str) -> String {
    format!("ws://{host}{CONNECT_PATH}?token={token}")
}

// ============================================================================
// Account Responses
// ============================================================================

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: String,
    pub user_name: String,
}

impl From<&chat_core::User> for RegisterResponse {
    fn from(user: &chat_core::User) -> Self {
        Self {
            id: user.id.clone(),
            user_name: user.username.clone(),
        }
    }
}

/// Successful login: where to open the WebSocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub url: String,
}

// ============================================================================
// Presence Responses
// ============================================================================

/// Number of live gateway connections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveConnectionsResponse {
    pub count: usize,
}

/// Live gateway users as `<id>-<username>` labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveUsersResponse {
    pub users: Vec<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
