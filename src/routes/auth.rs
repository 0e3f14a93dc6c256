/// Authentication Routes
///
/// Login landing page, CSRF token issuance and logout. Account storage lives
/// outside this crate, so these handlers only deal with tokens and cookies.

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde::Serialize;
use std::collections::HashMap;

use crate::auth::{clear_session_cookie, csrf_cookie, generate_token, tokens_match};
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError};
use crate::routing::sanitize_callback;

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Where to go after a successful login
const DEFAULT_CALLBACK: &str = "/dashboard";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageResponse {
    pub callback_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfResponse {
    pub csrf_token: String,
}

/// GET {auth.login_path}
///
/// Echoes the callback the login form should return to, read from the
/// `auth.callback_param` query parameter, after dropping anything that
/// would leave the site. An unparsable query string counts as no callback.
pub async fn login_page(req: HttpRequest, settings: web::Data<AuthSettings>) -> HttpResponse {
    let query = web::Query::<HashMap<String, String>>::from_query(req.query_string()).ok();
    let requested = query
        .as_ref()
        .and_then(|q| q.get(&settings.callback_param))
        .map(String::as_str);

    let callback_url = sanitize_callback(requested, DEFAULT_CALLBACK);
    HttpResponse::Ok().json(LoginPageResponse { callback_url })
}

/// GET /api/auth/csrf
///
/// Issues a fresh CSRF token both as a cookie and in the body; mutating
/// requests echo it back in the `X-CSRF-Token` header.
pub async fn issue_csrf_token(settings: web::Data<AuthSettings>) -> HttpResponse {
    let token = generate_token();
    HttpResponse::Ok()
        .cookie(csrf_cookie(settings.get_ref(), &token))
        .json(CsrfResponse { csrf_token: token })
}

/// POST /api/auth/logout
///
/// Clears the session cookie and sends the client to the login page.
///
/// # Errors
/// - 403: CSRF header missing or not matching the CSRF cookie
pub async fn logout(
    req: HttpRequest,
    settings: web::Data<AuthSettings>,
) -> Result<HttpResponse, AppError> {
    verify_csrf(&req, settings.get_ref())?;

    tracing::info!("Session cookie cleared");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, settings.login_path.clone()))
        .cookie(clear_session_cookie(settings.get_ref()))
        .finish())
}

/// Double-submit check: header value must equal the CSRF cookie value
fn verify_csrf(req: &HttpRequest, settings: &AuthSettings) -> Result<(), AppError> {
    let cookie = req.cookie(&settings.csrf_cookie_name);
    let header_value = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok());

    match (cookie, header_value) {
        (Some(cookie), Some(provided))
            if !provided.is_empty() && tokens_match(cookie.value(), provided) =>
        {
            Ok(())
        }
        _ => Err(AppError::Auth(AuthError::CsrfMismatch)),
    }
}
