//! # chat-db
//!
//! Storage layer implementing the `chat-core` repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL repositories via SQLx, with row models and mappers
//! - Connection pool management and startup migrations
//! - In-memory repositories for tests and database-less runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_db::{create_pool, run_migrations, PgUserRepository, PoolConfig, MIGRATIONS_DIR};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/chat")).await?;
//!     run_migrations(&pool, MIGRATIONS_DIR).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryMessageRepository, MemoryUserRepository};
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig, MIGRATIONS_DIR};
pub use repositories::{PgMessageRepository, PgUserRepository};
