//! # chat-core
//!
//! Domain layer containing the chat entities, domain errors, and the storage
//! traits the gateway consumes. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Message, User};
pub use error::DomainError;
pub use traits::{MessageRepository, RepoResult, UserRepository};
