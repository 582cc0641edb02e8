//! Cookie-keyed route gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page request passes through `gate_middleware` before reaching the
//! Leptos router. The decision itself is the pure `decide` function: a
//! request is let through when the auth cookie is present or the path is on
//! the public allow-list, and is redirected to the login page otherwise.
//! `PathMatcher` narrows which requests the gate looks at at all, so API
//! calls and static assets bypass it.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::state::AppState;

pub const DEFAULT_PUBLIC_PATHS: &str = "/login,/signup,/forbidden";
pub const DEFAULT_MATCHER: &str = "!/api,!/pkg,!/favicon.ico,!/healthz";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatcherError {
    #[error("empty exclusion in path matcher")]
    EmptyExclusion,
    #[error("path matcher token must start with '/': {0}")]
    NotAbsolute(String),
}

/// Outcome of gating a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

/// `true` when `path` is `prefix` itself or continues it at a segment boundary.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path == "/";
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() > 1 {
        trimmed.trim_end_matches('/').to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Path prefixes reachable without a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPaths(Vec<String>);

impl PublicPaths {
    /// Parse a comma-separated prefix list. Blank entries are dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(normalize_prefix)
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|prefix| prefix_matches(prefix, path))
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::parse(DEFAULT_PUBLIC_PATHS)
    }
}

/// Selects which request paths the gate applies to.
///
/// Expression syntax: comma-separated prefixes, `!` marks an exclusion.
/// `"!/api,!/pkg"` gates everything except `/api/**` and `/pkg/**`;
/// `"/admin"` gates only `/admin/**`. Exclusions always win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatcher {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl PathMatcher {
    /// Parse a matcher expression.
    ///
    /// # Errors
    ///
    /// Returns an error for a bare `!` or a prefix that does not start with `/`.
    pub fn parse(expr: &str) -> Result<Self, MatcherError> {
        let mut matcher = Self::default();
        for token in expr.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (negated, prefix) = match token.strip_prefix('!') {
                Some(rest) => (true, rest.trim()),
                None => (false, token),
            };
            if prefix.is_empty() {
                return Err(MatcherError::EmptyExclusion);
            }
            if !prefix.starts_with('/') {
                return Err(MatcherError::NotAbsolute(prefix.to_owned()));
            }
            let prefix = normalize_prefix(prefix);
            if negated {
                matcher.exclude.push(prefix);
            } else {
                matcher.include.push(prefix);
            }
        }
        Ok(matcher)
    }

    #[must_use]
    pub fn selects(&self, path: &str) -> bool {
        if self.exclude.iter().any(|p| prefix_matches(p, path)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| prefix_matches(p, path))
    }
}

/// Gate settings resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub cookie_name: String,
    pub login_path: String,
    pub public: PublicPaths,
    pub matcher: PathMatcher,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            cookie_name: "token".to_owned(),
            login_path: "/login".to_owned(),
            public: PublicPaths::default(),
            matcher: PathMatcher::parse(DEFAULT_MATCHER).unwrap_or_default(),
        }
    }
}

/// Build the login redirect, carrying the original location as `next`.
#[must_use]
pub fn login_redirect(login_path: &str, path_and_query: &str) -> String {
    if path_and_query.is_empty() || path_and_query == "/" {
        return login_path.to_owned();
    }
    format!("{login_path}?next={}", urlencoding::encode(path_and_query))
}

/// Decide whether a request for `path_and_query` may proceed.
#[must_use]
pub fn decide(config: &GateConfig, has_token: bool, path_and_query: &str) -> GateDecision {
    let path = path_and_query.split('?').next().unwrap_or_default();
    if !config.matcher.selects(path) || has_token || config.public.contains(path) {
        return GateDecision::Allow;
    }
    GateDecision::Redirect(login_redirect(&config.login_path, path_and_query))
}

/// Axum middleware applying `decide` with the configured auth cookie.
pub async fn gate_middleware(State(state): State<AppState>, jar: CookieJar, request: Request, next: Next) -> Response {
    let gate = &state.config.gate;
    let has_token = jar
        .get(&gate.cookie_name)
        .map(Cookie::value)
        .is_some_and(|v| !v.is_empty());
    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_owned(), |pq| pq.as_str().to_owned());

    match decide(gate, has_token, &path_and_query) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::Redirect(location) => {
            tracing::debug!(path = %path_and_query, %location, "gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}
