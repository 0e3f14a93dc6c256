/// Route classification for the request gate
///
/// A path is public when it equals a configured prefix or sits below one
/// (`prefix` followed by `/`), or when a configured pattern matches it.
/// Everything else needs a session cookie.

use regex::Regex;

use crate::configuration::AuthSettings;
use crate::error::{AppError, ConfigError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

#[derive(Clone, Debug)]
pub struct RoutePolicy {
    public_paths: Vec<String>,
    public_patterns: Vec<Regex>,
    login_path: String,
    callback_param: String,
    session_cookie_name: String,
}

impl RoutePolicy {
    /// Build the policy, compiling every configured pattern up front.
    ///
    /// # Errors
    /// Invalid patterns or a login path that is not absolute are
    /// configuration errors.
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, AppError> {
        if !settings.login_path.starts_with('/') {
            return Err(AppError::Config(ConfigError::InvalidValue(format!(
                "auth.login_path must start with '/': {}",
                settings.login_path
            ))));
        }
        if settings.session_cookie_name.is_empty() {
            return Err(AppError::Config(ConfigError::MissingRequired(
                "auth.session_cookie_name".to_string(),
            )));
        }

        let public_patterns = settings
            .public_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    AppError::Config(ConfigError::InvalidValue(format!(
                        "auth.public_patterns entry {:?}: {}",
                        pattern, e
                    )))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            public_paths: settings.public_paths.clone(),
            public_patterns,
            login_path: settings.login_path.clone(),
            callback_param: settings.callback_param.clone(),
            session_cookie_name: settings.session_cookie_name.clone(),
        })
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        // The login page is always reachable, otherwise the redirect would loop.
        if is_same_or_sub_path(path, &self.login_path) {
            return RouteClass::Public;
        }

        let listed = self
            .public_paths
            .iter()
            .any(|prefix| is_same_or_sub_path(path, prefix));

        if listed || self.public_patterns.iter().any(|re| re.is_match(path)) {
            RouteClass::Public
        } else {
            RouteClass::Protected
        }
    }

    /// `/login?callbackUrl=%2Fdashboard` for a request to `/dashboard`
    pub fn login_redirect(&self, requested_path: &str) -> String {
        format!(
            "{}?{}={}",
            self.login_path,
            self.callback_param,
            urlencoding::encode(requested_path)
        )
    }
}

fn is_same_or_sub_path(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/') && !prefix.ends_with('/'),
        None => false,
    }
}

/// Accept a post-login callback only if it stays on this site
///
/// Returns `fallback` for anything that does not start with a single `/`
/// (absolute URLs such as `https://host` or `javascript:` included),
/// protocol-relative URLs (`//host`) and backslash tricks.
pub fn sanitize_callback(callback: Option<&str>, fallback: &str) -> String {
    match callback.map(str::trim) {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\')
                && !target.chars().any(|c| c.is_control()) =>
        {
            target.to_string()
        }
        _ => fallback.to_string(),
    }
}
