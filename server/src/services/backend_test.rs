use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use client::net::types::Role;

use super::*;
use crate::test_support::spawn_backend;

fn fake_backend() -> Router {
    Router::new()
        .route(
            "/auth/login",
            post(|Json(body): Json<LoginRequest>| async move {
                if body.password == "secret" {
                    Json(serde_json::json!({
                        "token": "tok-1",
                        "user": { "id": 7, "name": "Ana", "email": body.email, "role": "admin" }
                    }))
                    .into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "message": "invalid credentials" }))).into_response()
                }
            }),
        )
        .route(
            "/reconciliation/summary",
            get(|headers: HeaderMap, Query(q): Query<HashMap<String, String>>| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                Json(serde_json::json!({ "auth": auth, "query": q }))
            }),
        )
        .route("/reconciliation/discrepancies/{id}", delete(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/reconciliation/discrepancies/{id}/status",
            patch(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/files/{name}",
            get(|Path(name): Path<String>| async move {
                (
                    [
                        (header::CONTENT_TYPE, "text/csv".to_owned()),
                        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{name}\"")),
                    ],
                    "a,b\n1,2\n",
                )
            }),
        )
}

async fn client() -> BackendClient {
    let base = spawn_backend(fake_backend()).await;
    BackendClient::new(&base, BackendTimeouts::default()).unwrap()
}

// =============================================================================
// live round trips against a local fake backend
// =============================================================================

#[tokio::test]
async fn login_returns_token_and_user() {
    let backend = client().await;
    let resp = backend
        .login(&LoginRequest { email: "ana@example.com".into(), password: "secret".into() })
        .await
        .unwrap();
    assert_eq!(resp.token, "tok-1");
    assert_eq!(resp.user.id, "7");
    assert_eq!(resp.user.role, Role::Admin);
}

#[tokio::test]
async fn login_failure_keeps_status_and_message() {
    let backend = client().await;
    let err = backend
        .login(&LoginRequest { email: "ana@example.com".into(), password: "nope".into() })
        .await
        .unwrap_err();
    match err {
        BackendError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn summary_forwards_bearer_token_and_non_empty_filters() {
    let backend = client().await;
    let filters = vec![
        ("collector".to_owned(), "visa".to_owned()),
        ("status".to_owned(), "  ".to_owned()),
    ];
    let body = backend.summary("tok-1", &filters).await.unwrap();
    assert_eq!(body["auth"], "Bearer tok-1");
    assert_eq!(body["query"]["collector"], "visa");
    assert!(body["query"].get("status").is_none());
}

#[tokio::test]
async fn delete_accepts_empty_success_body() {
    let backend = client().await;
    backend.delete_discrepancy("tok-1", "d-1").await.unwrap();
}

#[tokio::test]
async fn status_update_relays_plain_text_error() {
    let backend = client().await;
    let err = backend
        .update_discrepancy_status("tok-1", "d-1", &StatusUpdate { status: "resolved".into() })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "backend returned 500: boom");
}

#[tokio::test]
async fn download_reads_type_name_and_bytes() {
    let backend = client().await;
    let file = backend.download("tok-1", "liquidacion.csv").await.unwrap();
    assert_eq!(file.content_type, "text/csv");
    assert_eq!(file.file_name, "liquidacion.csv");
    assert_eq!(file.bytes, b"a,b\n1,2\n");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let backend = BackendClient::new("http://127.0.0.1:9", BackendTimeouts { request_secs: 2, connect_secs: 1 }).unwrap();
    let err = backend.files("tok", &Vec::new()).await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn dot_segments_are_refused_before_any_request() {
    let backend = BackendClient::new("http://127.0.0.1:9", BackendTimeouts { request_secs: 2, connect_secs: 1 }).unwrap();

    let err = backend.download("tok", "..").await.unwrap_err();
    assert!(matches!(err, BackendError::InvalidSegment(_)), "got {err:?}");

    let err = backend.delete_discrepancy("tok", ".").await.unwrap_err();
    assert!(matches!(err, BackendError::InvalidSegment(_)), "got {err:?}");

    let err = backend
        .update_discrepancy_status("tok", " ", &StatusUpdate { status: "resolved".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::InvalidSegment(_)), "got {err:?}");
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn path_segment_encodes_and_refuses_dot_segments() {
    assert_eq!(path_segment("a/b c").unwrap(), "a%2Fb%20c");
    assert_eq!(path_segment("cierre.csv").unwrap(), "cierre.csv");
    assert_eq!(path_segment("...").unwrap(), "...");
    for raw in ["", "  ", ".", "..", " .. "] {
        assert!(matches!(path_segment(raw), Err(BackendError::InvalidSegment(_))), "accepted {raw:?}");
    }
}

#[test]
fn error_message_prefers_known_json_fields() {
    assert_eq!(error_message(r#"{"message":"bad date"}"#), "bad date");
    assert_eq!(error_message(r#"{"detail":"not allowed"}"#), "not allowed");
    assert_eq!(error_message(r#"{"error":"nope","detail":""}"#), "nope");
}

#[test]
fn error_message_falls_back_to_body_or_default() {
    assert_eq!(error_message("  upstream exploded \n"), "upstream exploded");
    assert_eq!(error_message(""), FALLBACK_ERROR_MESSAGE);
    assert_eq!(error_message(r#"{"code":5}"#), r#"{"code":5}"#);
}

#[test]
fn filename_from_disposition_handles_quotes_and_missing() {
    assert_eq!(
        filename_from_disposition("attachment; filename=\"cierre.xlsx\""),
        Some("cierre.xlsx".to_owned())
    );
    assert_eq!(filename_from_disposition("attachment; filename=a.csv"), Some("a.csv".to_owned()));
    assert_eq!(filename_from_disposition("inline"), None);
    assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
}

#[test]
fn non_empty_trims_and_drops_blank_values() {
    let filters = vec![
        ("from".to_owned(), " 2024-01-01 ".to_owned()),
        ("to".to_owned(), String::new()),
    ];
    assert_eq!(non_empty(&filters), vec![("from".to_owned(), "2024-01-01".to_owned())]);
}

#[test]
fn valid_process_name_limits_alphabet() {
    assert!(valid_process_name("conciliacion_diaria"));
    assert!(valid_process_name("load-files-2"));
    assert!(!valid_process_name(""));
    assert!(!valid_process_name("../etc"));
    assert!(!valid_process_name("run now"));
}
