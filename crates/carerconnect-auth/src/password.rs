//! Argon2id password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AuthError;

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// Output is a PHC string: the algorithm, parameters, and salt are embedded,
/// so verification needs nothing but the stored hash. Hashing the same
/// password twice produces two different strings.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::HashingFailed(e.to_string()))
}

/// Verify a plaintext password against a stored PHC hash.
///
/// Uses the hash function's own constant-time verify routine. A malformed
/// stored hash verifies as `false` rather than erroring; the stored value is
/// not under the caller's control at this point.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("stored password hash is malformed");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Login check: verify a password against the hash looked up for the claimed
/// account, treating "no such user" and "wrong password" identically.
pub fn check_credentials(password: &str, stored_hash: Option<&str>) -> Result<(), AuthError> {
    match stored_hash {
        Some(hash) if verify_password(password, hash) => Ok(()),
        _ => Err(AuthError::InvalidCredentials),
    }
}
