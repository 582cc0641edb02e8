//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an "unavailable" failure since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call yields `Result<_, ApiFailure>`. The failure keeps the HTTP
//! status so callers can tell an expired session (401) from an ordinary
//! error, and a message fit for a toast.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use super::types::SessionUser;
#[cfg(feature = "hydrate")]
use super::types::{ApiErrorBody, LoginRequest, SignupRequest, StatusUpdate};
use crate::state::filters::ReconFilters;

#[cfg(not(feature = "hydrate"))]
const UNAVAILABLE: &str = "not available on server";

/// A failed API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status, or 0 when the request never got a response.
    pub status: u16,
    pub message: String,
}

impl ApiFailure {
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self { status: 0, message: message.into() }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
fn discrepancy_endpoint(id: &str) -> String {
    format!("/api/recon/discrepancies/{}", urlencoding::encode(id))
}

#[cfg(any(test, feature = "hydrate"))]
fn discrepancy_status_endpoint(id: &str) -> String {
    format!("{}/status", discrepancy_endpoint(id))
}

#[cfg(any(test, feature = "hydrate"))]
fn process_endpoint(process: &str) -> String {
    format!("/api/recon/processes/{}", urlencoding::encode(process))
}

/// Link target for downloading a processed file. The browser sends the auth
/// cookie along, so a plain anchor is enough.
#[must_use]
pub fn download_url(name: &str) -> String {
    format!("/api/recon/files/{}", urlencoding::encode(name))
}

/// Message for a non-OK response, preferring the server's `error` field.
#[cfg(any(test, feature = "hydrate"))]
fn failure_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"))
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
async fn check(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiFailure> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| failure_message(status, &body));
    Err(ApiFailure { status, message })
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiFailure> {
    let resp = check(resp).await?;
    resp.json::<T>().await.map_err(|e| ApiFailure::network(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn get_json(url: &str, filters: &ReconFilters) -> Result<Value, ApiFailure> {
    let query = filters.to_query();
    let resp = gloo_net::http::Request::get(url)
        .query(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .send()
        .await
        .map_err(|e| ApiFailure::network(e.to_string()))?;
    read_json(resp).await
}

// =============================================================================
// AUTH
// =============================================================================

/// Log in via `POST /api/auth/login`. The server sets the auth cookie.
///
/// # Errors
///
/// Returns the server's message when credentials are rejected or the
/// request fails.
pub async fn login(email: &str, password: &str) -> Result<SessionUser, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let payload = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .json(&payload)
            .map_err(|e| ApiFailure::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiFailure::network(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// Register via `POST /api/auth/signup`.
///
/// # Errors
///
/// Returns the server's message when registration is rejected.
pub async fn signup(name: &str, email: &str, password: &str) -> Result<SessionUser, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let payload = SignupRequest { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() };
        let resp = gloo_net::http::Request::post("/api/auth/signup")
            .json(&payload)
            .map_err(|e| ApiFailure::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiFailure::network(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, email, password);
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// Clear the auth cookie via `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}

// =============================================================================
// RECONCILIATION
// =============================================================================

/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn fetch_summary(filters: &ReconFilters) -> Result<Value, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/recon/summary", filters).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn fetch_discrepancies(filters: &ReconFilters) -> Result<Value, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/recon/discrepancies", filters).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn fetch_history(filters: &ReconFilters) -> Result<Value, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/recon/history", filters).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn fetch_digital(filters: &ReconFilters) -> Result<Value, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/recon/digital", filters).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn fetch_files(filters: &ReconFilters) -> Result<Value, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/recon/files", filters).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// Change a discrepancy's review status.
///
/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn update_discrepancy_status(id: &str, status: &str) -> Result<Value, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let payload = StatusUpdate { status: status.to_owned() };
        let resp = gloo_net::http::Request::patch(&discrepancy_status_endpoint(id))
            .json(&payload)
            .map_err(|e| ApiFailure::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiFailure::network(e.to_string()))?;
        let resp = check(resp).await?;
        Ok(resp.json::<Value>().await.unwrap_or(Value::Null))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, status);
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn delete_discrepancy(id: &str) -> Result<(), ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&discrepancy_endpoint(id))
            .send()
            .await
            .map_err(|e| ApiFailure::network(e.to_string()))?;
        check(resp).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiFailure::network(UNAVAILABLE))
    }
}

/// Trigger a backend batch process with optional JSON parameters.
///
/// # Errors
///
/// Returns a failure if the request fails or the server responds non-OK.
pub async fn run_process(process: &str, params: &Value) -> Result<Value, ApiFailure> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&process_endpoint(process))
            .json(params)
            .map_err(|e| ApiFailure::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiFailure::network(e.to_string()))?;
        let resp = check(resp).await?;
        Ok(resp.json::<Value>().await.unwrap_or(Value::Null))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (process, params);
        Err(ApiFailure::network(UNAVAILABLE))
    }
}
