//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the `/api` endpoints and the Leptos SSR pages under a
//! single Axum router. The cookie gate wraps everything; its path matcher
//! keeps `/api`, `/pkg` and health checks out of scope, so API routes rely
//! on the `AuthToken` extractor instead and answer 401 rather than redirect.

pub mod auth;
pub mod error;
pub mod recon;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::gate::gate_middleware;
use crate::state::AppState;

/// `/api` routes plus health check, without the page router.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/recon/summary", get(recon::summary))
        .route("/api/recon/discrepancies", get(recon::discrepancies))
        .route("/api/recon/discrepancies/{id}", delete(recon::delete_discrepancy))
        .route("/api/recon/discrepancies/{id}/status", patch(recon::update_status))
        .route("/api/recon/history", get(recon::history))
        .route("/api/recon/digital", get(recon::digital))
        .route("/api/recon/files", get(recon::files))
        .route("/api/recon/files/{name}", get(recon::download))
        .route("/api/recon/processes/{process}", post(recon::run_process))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application: API routes + gated Leptos SSR pages + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[package.metadata.leptos]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(client::app::shell))
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state.clone())
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(from_fn_with_state(state, gate_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
