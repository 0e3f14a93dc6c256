use chrono::{DateTime, Duration, Utc};

use crate::auth::token::{generate_token, hash_token_for_storage};
use crate::configuration::DEFAULT_SESSION_TTL_SECONDS;

/// What a token is for; decides its default lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenPurpose {
    Session,
    Csrf,
    PasswordReset,
    EmailVerification,
}

impl TokenPurpose {
    pub fn default_ttl(&self) -> Duration {
        match self {
            TokenPurpose::Session => Duration::seconds(DEFAULT_SESSION_TTL_SECONDS),
            TokenPurpose::Csrf => Duration::hours(1),
            TokenPurpose::PasswordReset => Duration::hours(1),
            TokenPurpose::EmailVerification => Duration::hours(24),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Session => "session",
            TokenPurpose::Csrf => "csrf",
            TokenPurpose::PasswordReset => "password_reset",
            TokenPurpose::EmailVerification => "email_verification",
        }
    }
}

/// A freshly generated token with the timestamps a caller persists next to it
#[derive(Clone, Debug)]
pub struct IssuedToken {
    token: String,
    purpose: TokenPurpose,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn new(purpose: TokenPurpose) -> Self {
        Self::with_ttl(purpose, purpose.default_ttl())
    }

    pub fn with_ttl(purpose: TokenPurpose, ttl: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            token: generate_token(),
            purpose,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Digest to store instead of the plaintext token
    pub fn storage_hash(&self) -> String {
        hash_token_for_storage(&self.token)
    }

    pub fn purpose(&self) -> TokenPurpose {
        self.purpose
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_creation() {
        let issued = IssuedToken::new(TokenPurpose::PasswordReset);

        assert_eq!(issued.purpose(), TokenPurpose::PasswordReset);
        assert_eq!(issued.token().len(), 64);
        assert_eq!(issued.expires_at() - issued.created_at(), Duration::hours(1));
        assert!(!issued.is_expired());
    }

    #[test]
    fn test_default_lifetimes() {
        assert_eq!(TokenPurpose::Session.default_ttl(), Duration::days(7));
        assert_eq!(TokenPurpose::EmailVerification.default_ttl(), Duration::hours(24));
        assert_eq!(TokenPurpose::Csrf.default_ttl(), Duration::hours(1));
    }

    #[test]
    fn test_negative_ttl_is_already_expired() {
        let issued = IssuedToken::with_ttl(TokenPurpose::Csrf, Duration::seconds(-1));
        assert!(issued.is_expired());
    }

    #[test]
    fn test_storage_hash_is_not_plaintext() {
        let issued = IssuedToken::new(TokenPurpose::EmailVerification);
        assert_ne!(issued.storage_hash(), issued.token());
        assert_eq!(issued.storage_hash(), hash_token_for_storage(issued.token()));
    }
}
