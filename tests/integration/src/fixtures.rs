//! Test fixtures and data generators

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Credentials body shared by registration and login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Fresh user name with a valid password
    pub fn unique() -> Self {
        Self::new(format!("user{}", unique_suffix()), "secret123")
    }

    /// Same user name, different password
    pub fn with_password(&self, password: &str) -> Self {
        Self::new(self.user_name.clone(), password)
    }
}
