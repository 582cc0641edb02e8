//! # client
//!
//! Leptos frontend for the reconciliation dashboard: pages, components,
//! session and toast state, and the REST helpers that talk to the server's
//! `/api` routes. Built with `ssr` for server rendering and `hydrate` for
//! the browser bundle.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
