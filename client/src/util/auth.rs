//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior, role
//! guards share one decision function, and every request failure funnels
//! through `report_failure` so an expired session logs the user out
//! consistently.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api::ApiFailure;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::toast::{ToastKind, ToastState, notify};

pub const LOGIN_PATH: &str = "/login";
pub const FORBIDDEN_PATH: &str = "/forbidden";

/// What a role guard should show for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session not read yet; show nothing.
    Pending,
    Render,
    Fallback,
    Redirect(String),
}

/// Decide a role guard's output. A missing user never satisfies the guard.
#[must_use]
pub fn guard_outcome(state: &AuthState, allowed: &[Role], redirect_to: Option<&str>) -> GuardOutcome {
    if state.loading {
        return GuardOutcome::Pending;
    }
    if state.has_role(allowed) {
        return GuardOutcome::Render;
    }
    match redirect_to {
        Some(path) => GuardOutcome::Redirect(path.to_owned()),
        None => GuardOutcome::Fallback,
    }
}

#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Resolve the post-login destination from a `next` query value.
///
/// Only same-origin absolute paths are honored; anything else falls back
/// to `/`. Browsers read `\` as `/` and drop tabs and newlines inside URLs,
/// so both are refused outright, as is a second leading `/` or `\`.
#[must_use]
pub fn safe_next(next: Option<&str>) -> String {
    let Some(path) = next.map(str::trim) else {
        return "/".to_owned();
    };
    let local = path.starts_with('/')
        && !matches!(path.chars().nth(1), Some('/' | '\\'))
        && !path.chars().any(|c| c == '\\' || c.is_control())
        && !path.starts_with(LOGIN_PATH);
    if local { path.to_owned() } else { "/".to_owned() }
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}

/// Run `load` once, as soon as a signed-in session is known.
pub fn load_when_signed_in(auth: RwSignal<AuthState>, load: Callback<()>) {
    let requested = RwSignal::new(false);
    Effect::new(move || {
        let ready = auth.with(|state| !state.loading && state.user.is_some());
        if ready && !requested.get_untracked() {
            requested.set(true);
            load.run(());
        }
    });
}

/// Surface a failed request. A 401 means the cookie is gone or expired, so
/// the stored session is dropped as well.
pub fn report_failure(failure: &ApiFailure, auth: RwSignal<AuthState>, toasts: RwSignal<ToastState>) {
    if failure.is_unauthorized() {
        crate::util::session_store::clear();
        auth.set(AuthState::resolved(None));
        notify(toasts, ToastKind::Error, "Tu sesión expiró. Inicia sesión nuevamente.");
        return;
    }
    notify(toasts, ToastKind::Error, failure.message.clone());
}
