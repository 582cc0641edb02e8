use axum::Router;
use axum::body::Body;
use axum::http::{Request as HttpRequest, StatusCode, header};
use axum::routing::get;
use tower::ServiceExt;

use super::*;
use crate::state::test_state;

fn config() -> GateConfig {
    GateConfig::default()
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn decide_redirects_without_token_on_private_path() {
    assert_eq!(
        decide(&config(), false, "/details"),
        GateDecision::Redirect("/login?next=%2Fdetails".to_owned())
    );
}

#[test]
fn decide_redirects_root_to_bare_login() {
    assert_eq!(decide(&config(), false, "/"), GateDecision::Redirect("/login".to_owned()));
}

#[test]
fn decide_keeps_query_in_next() {
    assert_eq!(
        decide(&config(), false, "/historico?collector=visa"),
        GateDecision::Redirect("/login?next=%2Fhistorico%3Fcollector%3Dvisa".to_owned())
    );
}

#[test]
fn decide_allows_any_path_with_token() {
    for path in ["/", "/details", "/download", "/historico", "/anything/else", "/login"] {
        assert_eq!(decide(&config(), true, path), GateDecision::Allow, "path {path}");
    }
}

#[test]
fn decide_allows_public_paths_without_token() {
    for path in ["/login", "/signup", "/forbidden", "/login/", "/signup?ref=x"] {
        assert_eq!(decide(&config(), false, path), GateDecision::Allow, "path {path}");
    }
}

#[test]
fn decide_does_not_treat_prefix_lookalikes_as_public() {
    assert!(matches!(decide(&config(), false, "/loginx"), GateDecision::Redirect(_)));
    assert!(matches!(decide(&config(), false, "/signups"), GateDecision::Redirect(_)));
}

#[test]
fn decide_skips_paths_outside_matcher() {
    for path in ["/api/recon/summary", "/pkg/recon-dashboard.wasm", "/favicon.ico", "/healthz"] {
        assert_eq!(decide(&config(), false, path), GateDecision::Allow, "path {path}");
    }
}

#[test]
fn decide_uses_configured_login_path() {
    let cfg = GateConfig { login_path: "/entrar".to_owned(), public: PublicPaths::parse("/entrar"), ..config() };
    assert_eq!(decide(&cfg, false, "/"), GateDecision::Redirect("/entrar".to_owned()));
    assert_eq!(decide(&cfg, false, "/entrar"), GateDecision::Allow);
}

// =============================================================================
// PublicPaths / PathMatcher
// =============================================================================

#[test]
fn public_paths_ignore_blank_entries_and_trailing_slash() {
    let public = PublicPaths::parse(" /login/ , , /signup");
    assert!(public.contains("/login"));
    assert!(public.contains("/login/reset"));
    assert!(public.contains("/signup"));
    assert!(!public.contains("/"));
}

#[test]
fn public_root_matches_only_root() {
    let public = PublicPaths::parse("/");
    assert!(public.contains("/"));
    assert!(!public.contains("/details"));
}

#[test]
fn matcher_without_includes_selects_everything_not_excluded() {
    let matcher = PathMatcher::parse("!/api,!/pkg").unwrap();
    assert!(matcher.selects("/"));
    assert!(matcher.selects("/details"));
    assert!(!matcher.selects("/api"));
    assert!(!matcher.selects("/api/auth/login"));
    assert!(matcher.selects("/apiary"));
}

#[test]
fn matcher_exclusion_wins_over_inclusion() {
    let matcher = PathMatcher::parse("/admin,!/admin/public").unwrap();
    assert!(matcher.selects("/admin"));
    assert!(matcher.selects("/admin/users"));
    assert!(!matcher.selects("/admin/public/x"));
    assert!(!matcher.selects("/details"));
}

#[test]
fn matcher_empty_expression_selects_everything() {
    let matcher = PathMatcher::parse(" , ").unwrap();
    assert!(matcher.selects("/anything"));
}

#[test]
fn matcher_rejects_bare_bang_and_relative_tokens() {
    assert_eq!(PathMatcher::parse("!"), Err(MatcherError::EmptyExclusion));
    assert_eq!(PathMatcher::parse("api"), Err(MatcherError::NotAbsolute("api".to_owned())));
}

// =============================================================================
// gate_middleware
// =============================================================================

fn gated_router() -> Router {
    let state = test_state("http://127.0.0.1:9");
    Router::new()
        .route("/", get(|| async { "dashboard" }))
        .route("/login", get(|| async { "login" }))
        .route("/api/ping", get(|| async { "pong" }))
        .layer(axum::middleware::from_fn_with_state(state.clone(), gate_middleware))
        .with_state(state)
}

#[tokio::test]
async fn middleware_redirects_without_cookie() {
    let resp = gated_router()
        .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn middleware_passes_with_cookie() {
    let resp = gated_router()
        .oneshot(
            HttpRequest::get("/")
                .header(header::COOKIE, "token=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn middleware_treats_empty_cookie_as_absent() {
    let resp = gated_router()
        .oneshot(
            HttpRequest::get("/")
                .header(header::COOKIE, "token=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn middleware_passes_public_and_unmatched_paths() {
    for path in ["/login", "/api/ping"] {
        let resp = gated_router()
            .oneshot(HttpRequest::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "path {path}");
    }
}
