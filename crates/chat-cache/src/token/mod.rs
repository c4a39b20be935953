//! Login token storage.
//!
//! Single-use, time-limited tokens handed out by the login endpoint and
//! redeemed exactly once by the WebSocket upgrade endpoint.

mod store;

pub use store::{SharedTokenStore, TokenError, TokenRecord, TokenStore};
