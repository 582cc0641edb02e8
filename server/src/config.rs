//! Server configuration parsed from environment variables.
//!
//! Required:
//! - `BACKEND_URL`: base URL of the reconciliation API
//!
//! Optional:
//! - `PORT`: default 3000
//! - `BACKEND_REQUEST_TIMEOUT_SECS`: default 60
//! - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
//! - `AUTH_COOKIE_NAME`: default `token`
//! - `LOGIN_PATH`: default `/login`
//! - `PUBLIC_PATHS`: default `/login,/signup,/forbidden`
//! - `GATE_MATCHER`: default `!/api,!/pkg,!/favicon.ico,!/healthz`
//! - `COOKIE_SECURE`: inferred from the `BACKEND_URL` scheme when unset
//! - `COOKIE_MAX_AGE_SECS`: default 28800 (8 hours)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::gate::{DEFAULT_MATCHER, DEFAULT_PUBLIC_PATHS, GateConfig, MatcherError, PathMatcher, PublicPaths};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COOKIE_NAME: &str = "token";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_COOKIE_MAX_AGE_SECS: i64 = 8 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var: {var}")]
    Missing { var: &'static str },
    #[error("invalid GATE_MATCHER: {0}")]
    Matcher(#[from] MatcherError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for BackendTimeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub backend_url: String,
    pub backend_timeouts: BackendTimeouts,
    pub gate: GateConfig,
    pub cookie_secure: bool,
    pub cookie_max_age_secs: i64,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `BACKEND_URL` is missing or `GATE_MATCHER` is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing { var: "BACKEND_URL" })?;

        let matcher = PathMatcher::parse(&lookup("GATE_MATCHER").unwrap_or_else(|| DEFAULT_MATCHER.to_owned()))?;
        let public = PublicPaths::parse(&lookup("PUBLIC_PATHS").unwrap_or_else(|| DEFAULT_PUBLIC_PATHS.to_owned()));
        let cookie_name = lookup("AUTH_COOKIE_NAME")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_owned());
        let login_path = lookup("LOGIN_PATH")
            .map(|v| v.trim().to_owned())
            .filter(|v| v.starts_with('/'))
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned());

        let cookie_secure = lookup("COOKIE_SECURE")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or_else(|| backend_url.starts_with("https://"));

        Ok(Self {
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            backend_timeouts: BackendTimeouts {
                request_secs: parse_or(lookup("BACKEND_REQUEST_TIMEOUT_SECS"), DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_or(lookup("BACKEND_CONNECT_TIMEOUT_SECS"), DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
            },
            backend_url,
            gate: GateConfig { cookie_name, login_path, public, matcher },
            cookie_secure,
            cookie_max_age_secs: parse_or(lookup("COOKIE_MAX_AGE_SECS"), DEFAULT_COOKIE_MAX_AGE_SECS),
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
