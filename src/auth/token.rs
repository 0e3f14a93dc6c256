/// Opaque Token Generation
///
/// Session ids, CSRF values, password-reset and email-verification tokens
/// all come from here. Tokens are lowercase hex with no embedded structure;
/// expiry and single-use invalidation belong to whoever stores them.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::error::{AppError, ValidationError};

/// 32 bytes = 256 bits of entropy, 64 hex characters
pub const DEFAULT_TOKEN_BYTES: usize = 32;

pub const MAX_TOKEN_BYTES: usize = 1024;

/// Generate a 64-character hex token
pub fn generate_token() -> String {
    random_hex(DEFAULT_TOKEN_BYTES)
}

/// Generate a hex token of `2 * byte_length` characters
///
/// # Errors
/// A zero or oversized length is a caller bug and is rejected with a
/// validation error.
pub fn generate_token_with_size(byte_length: usize) -> Result<String, AppError> {
    if byte_length == 0 || byte_length > MAX_TOKEN_BYTES {
        return Err(AppError::Validation(ValidationError::OutOfRange(
            "byte_length".to_string(),
            1,
            MAX_TOKEN_BYTES,
        )));
    }
    Ok(random_hex(byte_length))
}

/// SHA-256 digest of a token, for persisting reset and verification tokens
///
/// Only the digest is stored; the plaintext goes to the user.
pub fn hash_token_for_storage(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two tokens without short-circuiting on the first differing byte
pub fn tokens_match(expected: &str, provided: &str) -> bool {
    constant_time_eq(expected.as_bytes(), provided.as_bytes())
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn random_hex(byte_length: usize) -> String {
    let mut buffer = vec![0u8; byte_length];
    OsRng.fill_bytes(&mut buffer);
    hex::encode(buffer)
}
