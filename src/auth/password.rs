/// Password Hashing and Verification
///
/// Credentials are stored as `<hex sha256(password ++ salt)>:<hex salt>`.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::auth::token::constant_time_eq;
use crate::error::{AppError, AuthError, ValidationError};

/// Salt entropy in bytes (hex-encoded to 32 characters)
pub const SALT_BYTES: usize = 16;

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// A stored password: digest and the salt it was computed with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    digest: String,
    salt: String,
}

impl Credential {
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Check a plaintext password against this credential.
    pub fn matches(&self, password: &str) -> bool {
        let candidate = digest_with_salt(password, &self.salt);
        constant_time_eq(candidate.as_bytes(), self.digest.as_bytes())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.digest, self.salt)
    }
}

impl FromStr for Credential {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(digest), Some(salt), None) if !digest.is_empty() && !salt.is_empty() => {
                Ok(Self {
                    digest: digest.to_string(),
                    salt: salt.to_string(),
                })
            }
            _ => Err(AuthError::MalformedCredential),
        }
    }
}

/// Hash a password with a fresh random salt
///
/// Two calls with the same password return different credentials.
/// Empty passwords are hashed like any other input.
pub fn hash_password(password: &str) -> Credential {
    let mut salt_bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = hex::encode(salt_bytes);

    Credential {
        digest: digest_with_salt(password, &salt),
        salt,
    }
}

/// Verify a password against a stored credential string
///
/// Malformed credentials verify as `false`.
pub fn verify_password(password: &str, credential: &str) -> bool {
    match credential.parse::<Credential>() {
        Ok(credential) => credential.matches(password),
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting password check against malformed credential");
            false
        }
    }
}

/// Signup-form password rules
///
/// Requirements:
/// - 8 to 128 characters
/// - At least one digit, one lowercase and one uppercase letter
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(ValidationError::TooShort(
            "password".to_string(),
            MIN_PASSWORD_LENGTH,
        )));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(AppError::Validation(ValidationError::TooLong(
            "password".to_string(),
            MAX_PASSWORD_LENGTH,
        )));
    }

    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());

    if !has_digit || !has_lowercase || !has_uppercase {
        return Err(AppError::Validation(ValidationError::InvalidFormat(
            "password must contain at least one digit, one lowercase letter, and one uppercase letter"
                .to_string(),
        )));
    }

    Ok(())
}

fn digest_with_salt(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}
