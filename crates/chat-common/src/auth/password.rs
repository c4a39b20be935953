//! Account password hashing
//!
//! Argon2id with a random salt per hash. Stored hashes use the PHC string
//! format, so parameters travel with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password hashing failure
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash an account password for storage
///
/// # Errors
/// Returns `PasswordError::Hash` if Argon2 rejects the input
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a login password against a stored hash.
///
/// A mismatch is `Ok(false)`; only an unreadable hash is an error.
///
/// # Errors
/// Returns `PasswordError::MalformedHash` if `stored` is not a PHC string
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let stored = PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &stored)
        .is_ok())
}
