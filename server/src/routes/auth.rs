//! Auth routes: backend login/signup and the auth cookie.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use client::net::types::{LoginRequest, SessionUser, SignupRequest};
use time::Duration;

use super::error::ApiError;
use crate::config::AppConfig;
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Token taken from the auth cookie. Use as a handler parameter to require
/// a logged-in caller.
pub struct AuthToken(pub String);

impl<S> FromRequestParts<S> for AuthToken
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&app_state.config.gate.cookie_name)
            .map(Cookie::value)
            .unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::unauthorized());
        }
        Ok(Self(token.to_owned()))
    }
}

// =============================================================================
// COOKIES
// =============================================================================

pub(crate) fn auth_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.gate.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(config.cookie_max_age_secs))
        .build()
}

pub(crate) fn cleared_auth_cookie(config: &AppConfig) -> Cookie<'static> {
    Cookie::build((config.gate.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: authenticate against the backend, set the cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionUser>), ApiError> {
    let email = body.email.trim().to_owned();
    if email.is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }

    let resp = state
        .backend
        .login(&LoginRequest { email, password: body.password })
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "login rejected"))?;

    tracing::info!(user_id = %resp.user.id, role = resp.user.role.label(), "login");
    let jar = jar.add(auth_cookie(&state.config, resp.token));
    Ok((jar, Json(resp.user)))
}

/// `POST /api/auth/signup`: register through the backend. Does not log in.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SessionUser>), ApiError> {
    let registration = SignupRequest {
        name: body.name.trim().to_owned(),
        email: body.email.trim().to_owned(),
        password: body.password,
    };
    if registration.name.is_empty() || registration.email.is_empty() || registration.password.is_empty() {
        return Err(ApiError::bad_request("name, email and password are required"));
    }

    let user = state.backend.signup(&registration).await?;
    tracing::info!(user_id = %user.id, "signup");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/auth/logout`: clear the auth cookie. No token required.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (jar.add(cleared_auth_cookie(&state.config)), StatusCode::NO_CONTENT)
}
