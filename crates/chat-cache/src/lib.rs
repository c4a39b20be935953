//! # chat-cache
//!
//! In-process ephemeral stores. Nothing here survives a restart.
//!
//! ## Example
//!
//! ```ignore
//! use chat_cache::TokenStore;
//!
//! let tokens = TokenStore::new_shared(chrono::Duration::seconds(60));
//! let token = tokens.issue_new(user.clone());
//!
//! // later, on the upgrade request
//! let owner = tokens.redeem(&token)?;
//! ```

pub mod token;

pub use token::{SharedTokenStore, TokenError, TokenRecord, TokenStore};
