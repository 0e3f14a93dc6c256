use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;

use crate::configuration::Settings;
use crate::error::AppError;
use crate::middleware::{RequestLogger, RouteGate};
use crate::routes::{dashboard, health_check, issue_csrf_token, login_page, logout};
use crate::routing::RoutePolicy;

/// Build the HTTP server on an already bound listener.
///
/// The route policy is compiled once here so a bad pattern fails at startup
/// rather than on the first request.
pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, AppError> {
    let policy = RoutePolicy::from_settings(&settings.auth)?;
    let login_path = policy.login_path().to_string();
    let auth_settings = web::Data::new(settings.auth);

    let server = HttpServer::new(move || {
        App::new()
            // Gate runs inside the logger so redirects are logged too
            .wrap(RouteGate::new(policy.clone()))
            .wrap(RequestLogger)
            .app_data(auth_settings.clone())
            .route("/health_check", web::get().to(health_check))
            .route(&login_path, web::get().to(login_page))
            .route("/api/auth/csrf", web::get().to(issue_csrf_token))
            .route("/api/auth/logout", web::post().to(logout))
            .route("/dashboard", web::get().to(dashboard))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
