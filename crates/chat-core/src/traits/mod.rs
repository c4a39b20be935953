//! Storage traits (ports)

mod repositories;

pub use repositories::{MessageRepository, RepoResult, UserRepository};
