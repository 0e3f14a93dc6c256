/// Authentication module
///
/// Password hashing, opaque token generation and session/CSRF cookies.

mod cookies;
mod issued_token;
mod password;
mod token;

pub use cookies::{clear_session_cookie, csrf_cookie, session_cookie};
pub use issued_token::{IssuedToken, TokenPurpose};
pub use password::{hash_password, validate_password_strength, verify_password, Credential};
pub use token::{
    generate_token, generate_token_with_size, hash_token_for_storage, tokens_match,
    DEFAULT_TOKEN_BYTES,
};
