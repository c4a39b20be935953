//! # chat-api
//!
//! HTTP server built with Axum: account endpoints, live-user views, the
//! health check, and the WebSocket gateway mounted on the same router.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server, serve};
pub use state::AppState;
