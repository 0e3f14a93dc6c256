//! Authentication primitives and the request gate for the taskflow web app.
//!
//! - [`auth`]: salted password credentials, opaque tokens, session/CSRF cookies
//! - [`routing`] and [`middleware::RouteGate`]: public/protected path policy
//! - [`duration::format_duration`]: `1h 23m 45s` style display strings

pub mod auth;
pub mod configuration;
pub mod duration;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod routing;
pub mod startup;
pub mod telemetry;

pub use startup::run;
