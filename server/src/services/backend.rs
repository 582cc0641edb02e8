//! HTTP client for the external reconciliation API.
//!
//! ARCHITECTURE
//! ============
//! The dashboard owns no reconciliation data. Every `/api/recon/*` route is
//! a thin authenticated hop through `BackendClient`, which forwards the
//! caller's token as a bearer credential and hands JSON bodies back
//! untouched.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses are preserved (status + best-effort message) so the
//! route layer can relay them verbatim; transport and decode failures are
//! reported separately and surface as 502.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::time::Duration;

use client::net::types::{LoginRequest, LoginResponse, SessionUser, SignupRequest, StatusUpdate};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::BackendTimeouts;

const FALLBACK_ERROR_MESSAGE: &str = "backend request failed";
const DEFAULT_DOWNLOAD_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected backend response: {0}")]
    Decode(String),
    #[error("invalid path segment: {0:?}")]
    InvalidSegment(String),
}

/// Query parameters forwarded to the backend, with empty values dropped.
pub type Filters = Vec<(String, String)>;

/// A file fetched from the backend, ready to stream to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub content_type: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a pooled client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS/HTTP stack cannot be initialized.
    pub fn new(base_url: &str, timeouts: BackendTimeouts) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, BackendError> {
        let req = self.http.post(self.url("/auth/login")).json(credentials);
        decode(send(req).await?).await
    }

    pub async fn signup(&self, registration: &SignupRequest) -> Result<SessionUser, BackendError> {
        let req = self.http.post(self.url("/auth/signup")).json(registration);
        decode(send(req).await?).await
    }

    // =========================================================================
    // RECONCILIATION
    // =========================================================================

    pub async fn summary(&self, token: &str, filters: &Filters) -> Result<Value, BackendError> {
        self.get_json(token, "/reconciliation/summary", filters).await
    }

    pub async fn discrepancies(&self, token: &str, filters: &Filters) -> Result<Value, BackendError> {
        self.get_json(token, "/reconciliation/discrepancies", filters).await
    }

    pub async fn update_discrepancy_status(
        &self,
        token: &str,
        id: &str,
        update: &StatusUpdate,
    ) -> Result<Value, BackendError> {
        let path = format!("/reconciliation/discrepancies/{}/status", path_segment(id)?);
        let req = self.http.patch(self.url(&path)).bearer_auth(token).json(update);
        json_or_null(send(req).await?).await
    }

    pub async fn delete_discrepancy(&self, token: &str, id: &str) -> Result<(), BackendError> {
        let path = format!("/reconciliation/discrepancies/{}", path_segment(id)?);
        let req = self.http.delete(self.url(&path)).bearer_auth(token);
        send(req).await?;
        Ok(())
    }

    pub async fn history(&self, token: &str, filters: &Filters) -> Result<Value, BackendError> {
        self.get_json(token, "/reconciliation/history", filters).await
    }

    pub async fn digital_summary(&self, token: &str, filters: &Filters) -> Result<Value, BackendError> {
        self.get_json(token, "/reconciliation/digital", filters).await
    }

    // =========================================================================
    // FILES + PROCESSES
    // =========================================================================

    pub async fn files(&self, token: &str, filters: &Filters) -> Result<Value, BackendError> {
        self.get_json(token, "/files", filters).await
    }

    pub async fn download(&self, token: &str, name: &str) -> Result<Download, BackendError> {
        let path = format!("/files/{}", path_segment(name)?);
        let resp = send(self.http.get(self.url(&path)).bearer_auth(token)).await?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_DOWNLOAD_CONTENT_TYPE)
            .to_owned();
        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| name.to_owned());
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?
            .to_vec();

        Ok(Download { content_type, file_name, bytes })
    }

    pub async fn run_process(&self, token: &str, process: &str, params: &Value) -> Result<Value, BackendError> {
        let path = format!("/processes/{}/run", path_segment(process)?);
        let req = self.http.post(self.url(&path)).bearer_auth(token).json(params);
        json_or_null(send(req).await?).await
    }

    async fn get_json(&self, token: &str, path: &str, filters: &Filters) -> Result<Value, BackendError> {
        let req = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .query(&non_empty(filters));
        json_or_null(send(req).await?).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send(req: RequestBuilder) -> Result<Response, BackendError> {
    let resp = req.send().await.map_err(|e| BackendError::Transport(e.to_string()))?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Status { status: status.as_u16(), message: error_message(&body) })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
    let body = resp.text().await.map_err(|e| BackendError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Decode a JSON body, treating an empty body (e.g. 204) as `null`.
async fn json_or_null(resp: Response) -> Result<Value, BackendError> {
    let body = resp.text().await.map_err(|e| BackendError::Transport(e.to_string()))?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Drop query pairs whose value is blank.
#[must_use]
pub fn non_empty(filters: &Filters) -> Filters {
    filters
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| (k.clone(), v.trim().to_owned()))
        .collect()
}

/// Pull a human-readable message out of a backend error body.
#[must_use]
pub fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(Value::String(msg)) = map.get(key) {
                if !msg.trim().is_empty() {
                    return msg.trim().to_owned();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Extract `filename` from a `Content-Disposition` header value.
#[must_use]
pub fn filename_from_disposition(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        let value = part.strip_prefix("filename=")?;
        let value = value.trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_owned())
    })
}

/// Percent-encode one backend path segment.
///
/// Encoding leaves `.` and `..` untouched and URL parsing would then
/// collapse them into a parent path, so those (and blanks) are refused.
pub fn path_segment(raw: &str) -> Result<String, BackendError> {
    match raw.trim() {
        "" | "." | ".." => Err(BackendError::InvalidSegment(raw.to_owned())),
        _ => Ok(urlencoding::encode(raw).into_owned()),
    }
}

/// Process names are path segments on the backend; keep them to a safe alphabet.
#[must_use]
pub fn valid_process_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
