//! In-memory repository implementations
//!
//! Same contracts as the PostgreSQL repositories, backed by `DashMap`.
//! Used by tests and when no `DATABASE_URL` is configured.

mod message;
mod user;

pub use message::MemoryMessageRepository;
pub use user::MemoryUserRepository;
