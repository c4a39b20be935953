//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{
    connect_url, ActiveConnectionsResponse, ActiveUsersResponse, HealthResponse, LoginResponse,
    RegisterResponse, CONNECT_PATH,
};
