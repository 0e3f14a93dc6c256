use config::{ConfigError, Environment, File};

/// Default lifetime of a session cookie (7 days).
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Session cookie and route gate settings
#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AuthSettings {
    pub session_cookie_name: String,
    pub csrf_cookie_name: String,
    /// Where unauthenticated requests for protected pages are sent
    pub login_path: String,
    /// Query parameter carrying the originally requested path
    pub callback_param: String,
    pub secure_cookies: bool,
    pub session_ttl_seconds: i64,
    /// Literal prefixes; a path is public if it equals one or is a sub-path of one
    pub public_paths: Vec<String>,
    /// Regular expressions matched against the full path
    pub public_patterns: Vec<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_token".to_string(),
            csrf_cookie_name: "csrf_token".to_string(),
            login_path: "/login".to_string(),
            callback_param: "callbackUrl".to_string(),
            secure_cookies: false,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            public_paths: [
                "/",
                "/login",
                "/signup",
                "/forgot-password",
                "/reset-password",
                "/verify-email",
                "/health_check",
                "/api/auth/login",
                "/api/auth/signup",
                "/api/auth/logout",
                "/api/auth/csrf",
                "/api/auth/forgot-password",
                "/api/auth/verify-email",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            public_patterns: vec![
                r"^/api/auth/reset-password(/.*)?$".to_string(),
                r"^/static/".to_string(),
                r"^/favicon\.ico$".to_string(),
            ],
        }
    }
}

/// Load settings once at process start.
///
/// Later sources override earlier ones: built-in defaults, then an optional
/// `configuration` file (yaml, toml or json), then `APP_`-prefixed environment
/// variables such as `APP_APPLICATION__PORT=9000`.
///
/// The two list settings take comma-separated values, e.g.
/// `APP_AUTH__PUBLIC_PATHS=/login,/signup`. A public pattern that itself
/// contains a comma (`\d{1,3}`) has to go in the configuration file instead.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(environment())
        .build()?;
    settings.try_deserialize::<Settings>()
}

fn environment() -> Environment {
    Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("auth.public_paths")
        .with_list_parse_key("auth.public_patterns")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let settings: Settings = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("Failed to deserialize empty configuration");

        assert_eq!(settings.application.port, 8080);
        assert_eq!(settings.auth.login_path, "/login");
        assert_eq!(settings.auth.callback_param, "callbackUrl");
        assert!(settings.auth.public_paths.contains(&"/login".to_string()));
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let settings: Settings = config::Config::builder()
            .set_override("auth.login_path", "/signin")
            .and_then(|b| b.set_override("application.port", 9000))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("Failed to deserialize configuration");

        assert_eq!(settings.auth.login_path, "/signin");
        assert_eq!(settings.application.port, 9000);
        assert_eq!(settings.auth.session_cookie_name, "session_token");
    }

    #[test]
    fn test_address() {
        let app = ApplicationSettings::default();
        assert_eq!(app.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_environment_overrides_list_settings() {
        std::env::set_var("APP_AUTH__PUBLIC_PATHS", "/login,/signup");
        std::env::set_var("APP_AUTH__PUBLIC_PATTERNS", "^/docs/");
        std::env::set_var("APP_AUTH__CALLBACK_PARAM", "next");

        let settings = get_configuration();

        std::env::remove_var("APP_AUTH__PUBLIC_PATHS");
        std::env::remove_var("APP_AUTH__PUBLIC_PATTERNS");
        std::env::remove_var("APP_AUTH__CALLBACK_PARAM");

        let settings = settings.expect("Failed to load configuration");
        assert_eq!(settings.auth.public_paths, vec!["/login", "/signup"]);
        assert_eq!(settings.auth.public_patterns, vec!["^/docs/"]);
        assert_eq!(settings.auth.callback_param, "next");
    }
}
