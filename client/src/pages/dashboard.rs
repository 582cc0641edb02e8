//! Reconciliation summary page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route. Shows the backend's summary payload as
//! headline cards (top-level scalars) plus a table of per-collector rows.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use crate::components::data_table::DataTable;
use crate::components::filter_bar::FilterBar;
use crate::state::auth::AuthState;
use crate::state::filters::ReconFilters;
use crate::state::toast::ToastState;
use crate::util::auth::{install_unauth_redirect, load_when_signed_in};
use crate::util::format::humanize_key;
use crate::util::table::{rows_of, scalar_fields};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_unauth_redirect(auth, use_navigate());

    let filters = RwSignal::new(ReconFilters::default());
    let summary = RwSignal::new(Value::Null);
    let loading = RwSignal::new(false);

    let load = Callback::new(move |()| {
        if loading.get_untracked() {
            return;
        }
        loading.set(true);
        let current = filters.get_untracked();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_summary(&current).await {
                Ok(data) => summary.set(data),
                Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (current, toasts);
    });
    load_when_signed_in(auth, load);

    let cards = move || summary.with(scalar_fields);
    let rows = Signal::derive(move || summary.with(rows_of));

    view! {
        <section class="page page--dashboard">
            <header class="page__header">
                <h1>"Resumen de conciliación"</h1>
            </header>
            <FilterBar filters=filters on_apply=load busy=loading />
            <Show when=move || loading.get()>
                <p class="page__loading">"Cargando..."</p>
            </Show>
            <div class="summary-cards">
                {move || {
                    cards()
                        .into_iter()
                        .map(|(key, value)| {
                            view! {
                                <div class="summary-card">
                                    <span class="summary-card__label">{humanize_key(&key)}</span>
                                    <span class="summary-card__value">{value}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <DataTable rows=rows />
        </section>
    }
}
