use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_state;
use crate::test_support::spawn_backend;

fn fake_backend() -> Router {
    Router::new()
        .route(
            "/auth/login",
            post(|Json(body): Json<LoginRequest>| async move {
                if body.password == "secret" {
                    Json(serde_json::json!({
                        "token": "tok-9",
                        "user": { "id": "u1", "name": "Ana", "email": body.email, "role": "analyst" }
                    }))
                    .into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "detail": "bad credentials" }))).into_response()
                }
            }),
        )
        .route(
            "/auth/signup",
            post(|Json(body): Json<SignupRequest>| async move {
                Json(serde_json::json!({ "id": 3, "name": body.name, "email": body.email, "role": "viewer" }))
            }),
        )
}

async fn app() -> Router {
    let base = spawn_backend(fake_backend()).await;
    api_routes(test_state(&base))
}

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn login_sets_http_only_cookie_and_returns_user() {
    let resp = app()
        .await
        .oneshot(json_post(
            "/api/auth/login",
            &serde_json::json!({ "email": " ana@example.com ", "password": "secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_owned();
    assert!(cookie.starts_with("token=tok-9"), "cookie: {cookie}");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));

    let user = body_json(resp).await;
    assert_eq!(user["email"], "ana@example.com");
    assert_eq!(user["role"], "analyst");
    assert!(user.get("token").is_none());
}

#[tokio::test]
async fn login_relays_backend_rejection() {
    let resp = app()
        .await
        .oneshot(json_post(
            "/api/auth/login",
            &serde_json::json!({ "email": "ana@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(resp).await["error"], "bad credentials");
}

#[tokio::test]
async fn login_requires_both_fields() {
    let resp = app()
        .await
        .oneshot(json_post("/api/auth/login", &serde_json::json!({ "email": "  ", "password": "x" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_returns_created_user_without_cookie() {
    let resp = app()
        .await
        .oneshot(json_post(
            "/api/auth/signup",
            &serde_json::json!({ "name": "Bea", "email": "bea@example.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let user = body_json(resp).await;
    assert_eq!(user["id"], "3");
    assert_eq!(user["role"], "viewer");
}

#[tokio::test]
async fn logout_clears_cookie_without_token() {
    let resp = app()
        .await
        .oneshot(Request::post("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("token=;"), "cookie: {cookie}");
    assert!(cookie.contains("Max-Age=0"));
}

#[test]
fn auth_cookie_uses_configured_name_and_lifetime() {
    let state = test_state("http://127.0.0.1:9");
    let cookie = auth_cookie(&state.config, "abc".to_owned());
    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.value(), "abc");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(
        cookie.max_age(),
        Some(Duration::seconds(crate::config::DEFAULT_COOKIE_MAX_AGE_SECS))
    );
}
