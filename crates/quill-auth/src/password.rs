//! Password hashing and verification.
//!
//! Uses Argon2id (hybrid mode) with default parameters and a random salt
//! from `OsRng`, producing PHC-formatted strings for storage. Two hashes
//! of the same password always differ.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a password for storage.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` only if hashing itself fails
/// (entropy or resource exhaustion — rare).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-formatted verifier.
///
/// Comparison is constant-time inside the argon2 crate. A malformed
/// verifier is treated as a mismatch rather than an error, so callers
/// never learn anything about the stored format.
#[must_use]
pub fn verify_password(password: &str, verifier: &str) -> bool {
    let parsed = match PasswordHash::new(verifier) {
        Ok(h) => h,
        Err(e) => {
            tracing::debug!(error = %e, "Stored password verifier is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
