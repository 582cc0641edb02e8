//! Discrepancy history page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use crate::components::data_table::DataTable;
use crate::components::filter_bar::FilterBar;
use crate::state::auth::AuthState;
use crate::state::filters::ReconFilters;
use crate::state::toast::ToastState;
use crate::util::auth::{install_unauth_redirect, load_when_signed_in};
use crate::util::table::rows_of;

#[component]
pub fn HistoricoPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_unauth_redirect(auth, use_navigate());

    let filters = RwSignal::new(ReconFilters::default());
    let history = RwSignal::new(Value::Null);
    let loading = RwSignal::new(false);

    let load = Callback::new(move |()| {
        if loading.get_untracked() {
            return;
        }
        loading.set(true);
        let current = filters.get_untracked();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_history(&current).await {
                Ok(data) => history.set(data),
                Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (current, toasts);
    });
    load_when_signed_in(auth, load);

    view! {
        <section class="page page--historico">
            <header class="page__header">
                <h1>"Histórico de discrepancias"</h1>
            </header>
            <FilterBar filters=filters on_apply=load show_status=true busy=loading />
            <Show when=move || loading.get()>
                <p class="page__loading">"Cargando..."</p>
            </Show>
            <DataTable rows=Signal::derive(move || history.with(rows_of)) empty_label="Sin movimientos en el período." />
        </section>
    }
}
