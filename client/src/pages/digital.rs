//! Digital-channel summary page.
//!
//! Restricted to admins and analysts; other roles are sent to `/forbidden`.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use crate::components::data_table::DataTable;
use crate::components::filter_bar::FilterBar;
use crate::components::role_guard::RoleGuard;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::filters::ReconFilters;
use crate::state::toast::ToastState;
use crate::util::auth::{FORBIDDEN_PATH, install_unauth_redirect, load_when_signed_in};
use crate::util::format::humanize_key;
use crate::util::table::{rows_of, scalar_fields};

#[component]
pub fn DigitalPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_unauth_redirect(auth, use_navigate());

    let filters = RwSignal::new(ReconFilters::default());
    let digital = RwSignal::new(Value::Null);
    let loading = RwSignal::new(false);

    let load = Callback::new(move |()| {
        if loading.get_untracked() || !auth.with_untracked(|a| a.has_role(&[Role::Admin, Role::Analyst])) {
            return;
        }
        loading.set(true);
        let current = filters.get_untracked();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_digital(&current).await {
                Ok(data) => digital.set(data),
                Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (current, toasts);
    });
    load_when_signed_in(auth, load);

    view! {
        <RoleGuard allowed=vec![Role::Admin, Role::Analyst] redirect_to=FORBIDDEN_PATH>
            <section class="page page--digital">
                <header class="page__header">
                    <h1>"Canal digital"</h1>
                </header>
                <FilterBar filters=filters on_apply=load busy=loading />
                <Show when=move || loading.get()>
                    <p class="page__loading">"Cargando..."</p>
                </Show>
                <dl class="digital-totals">
                    {move || {
                        digital
                            .with(scalar_fields)
                            .into_iter()
                            .map(|(key, value)| {
                                view! {
                                    <dt>{humanize_key(&key)}</dt>
                                    <dd>{value}</dd>
                                }
                            })
                            .collect_view()
                    }}
                </dl>
                <DataTable rows=Signal::derive(move || digital.with(rows_of)) />
            </section>
        </RoleGuard>
    }
}
