//! Reconciliation proxy routes.
//!
//! Each handler requires the auth cookie and forwards to one backend call.
//! Payloads pass through as opaque JSON.

#[cfg(test)]
#[path = "recon_test.rs"]
mod recon_test;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use client::net::types::StatusUpdate;
use serde_json::Value;

use super::auth::AuthToken;
use super::error::ApiError;
use crate::services::backend::{Download, Filters, valid_process_name};
use crate::state::AppState;

/// `GET /api/recon/summary`
pub async fn summary(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Query(filters): Query<Filters>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.summary(&token, &filters).await?))
}

/// `GET /api/recon/discrepancies`
pub async fn discrepancies(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Query(filters): Query<Filters>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.discrepancies(&token, &filters).await?))
}

/// `PATCH /api/recon/discrepancies/{id}/status`
pub async fn update_status(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    let status = update.status.trim();
    if status.is_empty() {
        return Err(ApiError::bad_request("status is required"));
    }
    let body = state
        .backend
        .update_discrepancy_status(&token, &id, &StatusUpdate { status: status.to_owned() })
        .await?;
    tracing::info!(discrepancy_id = %id, %status, "discrepancy status updated");
    Ok(Json(body))
}

/// `DELETE /api/recon/discrepancies/{id}`
pub async fn delete_discrepancy(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.backend.delete_discrepancy(&token, &id).await?;
    tracing::info!(discrepancy_id = %id, "discrepancy deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/recon/history`
pub async fn history(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Query(filters): Query<Filters>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.history(&token, &filters).await?))
}

/// `GET /api/recon/digital`
pub async fn digital(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Query(filters): Query<Filters>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.digital_summary(&token, &filters).await?))
}

/// `GET /api/recon/files`
pub async fn files(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Query(filters): Query<Filters>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.backend.files(&token, &filters).await?))
}

/// `GET /api/recon/files/{name}`: stream a processed file as an attachment.
pub async fn download(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let file = state.backend.download(&token, &name).await?;
    tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "file download");
    Ok(attachment_response(file))
}

/// `POST /api/recon/processes/{process}`: trigger a backend batch process.
///
/// The body is optional JSON forwarded as process parameters.
pub async fn run_process(
    State(state): State<AppState>,
    AuthToken(token): AuthToken,
    Path(process): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if !valid_process_name(&process) {
        return Err(ApiError::bad_request(format!("invalid process name: {process}")));
    }
    let params = parse_params(&body)?;
    let result = state.backend.run_process(&token, &process, &params).await?;
    tracing::info!(%process, "process triggered");
    Ok(Json(result))
}

pub(crate) fn parse_params(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    match serde_json::from_slice(body) {
        Ok(params @ Value::Object(_)) => Ok(params),
        Ok(_) => Err(ApiError::bad_request("process parameters must be a JSON object")),
        Err(e) => Err(ApiError::bad_request(format!("invalid JSON body: {e}"))),
    }
}

/// `Content-Disposition` value for `file_name`. Only printable ASCII
/// survives; quotes and backslashes are dropped.
pub(crate) fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control() && *c != '"' && *c != '\\')
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

fn attachment_response(file: Download) -> Response {
    let mut resp = file.bytes.into_response();
    let headers = resp.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&file.content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&content_disposition(&file.file_name)) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    resp
}
