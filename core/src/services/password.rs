//! Password digests.
//!
//! Passwords are stored as an unsalted SHA-256 hex digest for compatibility
//! with existing rows. This is a fast hash and offers little resistance to
//! offline guessing if the user table leaks.

use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `password`
pub fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compares `password` against a stored digest in constant time
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    constant_time_eq(digest_password(password).as_bytes(), stored_digest.as_bytes())
}
