//! Role-based rendering guard.
//!
//! DESIGN
//! ======
//! The decision itself lives in `util::auth::guard_outcome` so it can be
//! tested without a reactive runtime. This component only maps the outcome
//! to a view or a navigation.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardOutcome, guard_outcome};

/// Render `children` only when the session role is in `allowed`.
///
/// Otherwise renders `fallback` (empty by default), or navigates to
/// `redirect_to` when one is given. Nothing renders while the session is
/// still being read.
#[component]
pub fn RoleGuard(
    allowed: Vec<Role>,
    #[prop(optional, into)] fallback: ViewFn,
    #[prop(optional, into)] redirect_to: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let outcome = Memo::new(move |_| guard_outcome(&auth.get(), &allowed, redirect_to.as_deref()));

    Effect::new(move || {
        if let GuardOutcome::Redirect(path) = outcome.get() {
            navigate(&path, NavigateOptions::default());
        }
    });

    move || match outcome.get() {
        GuardOutcome::Render => children().into_any(),
        GuardOutcome::Fallback => fallback.run(),
        GuardOutcome::Pending | GuardOutcome::Redirect(_) => ().into_any(),
    }
}
