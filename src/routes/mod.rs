mod auth;
mod dashboard;
mod health_check;

pub use auth::{issue_csrf_token, login_page, logout, CSRF_HEADER};
pub use dashboard::dashboard;
pub use health_check::health_check;
