use actix_web::cookie::{time::Duration, Cookie, SameSite};

use crate::configuration::AuthSettings;

/// Session cookie carrying an opaque token
///
/// HttpOnly so page scripts cannot read it; `secure` follows configuration.
pub fn session_cookie(settings: &AuthSettings, token: &str) -> Cookie<'static> {
    Cookie::build(settings.session_cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies)
        .max_age(Duration::seconds(settings.session_ttl_seconds))
        .finish()
}

/// Cookie that deletes the session cookie on the client
pub fn clear_session_cookie(settings: &AuthSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build(settings.session_cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookies)
        .finish();
    cookie.make_removal();
    cookie
}

/// Double-submit CSRF cookie; readable by scripts so they can echo it in a header
pub fn csrf_cookie(settings: &AuthSettings, token: &str) -> Cookie<'static> {
    Cookie::build(settings.csrf_cookie_name.clone(), token.to_string())
        .path("/")
        .http_only(false)
        .same_site(SameSite::Strict)
        .secure(settings.secure_cookies)
        .finish()
}
