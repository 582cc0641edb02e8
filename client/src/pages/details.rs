//! Discrepancy review page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists backend discrepancies with per-row status changes. Deleting a
//! discrepancy is limited to admins; other roles see no delete control.
//! Every mutation reloads the list so the table mirrors the backend.

#[cfg(test)]
#[path = "details_test.rs"]
mod details_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use crate::components::data_table::DataTable;
use crate::components::filter_bar::FilterBar;
use crate::components::role_guard::RoleGuard;
use crate::components::status_select::StatusSelect;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::filters::ReconFilters;
use crate::state::toast::ToastState;
use crate::util::auth::{install_unauth_redirect, load_when_signed_in};
use crate::util::table::{row_id, rows_of};

/// Current status of a row, empty when absent.
fn row_status(row: &Value) -> String {
    row.get("status").and_then(Value::as_str).unwrap_or_default().to_owned()
}

#[component]
pub fn DetailsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_unauth_redirect(auth, use_navigate());

    let filters = RwSignal::new(ReconFilters::default());
    let discrepancies = RwSignal::new(Value::Null);
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);

    let load = Callback::new(move |()| {
        if loading.get_untracked() {
            return;
        }
        loading.set(true);
        let current = filters.get_untracked();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_discrepancies(&current).await {
                Ok(data) => discrepancies.set(data),
                Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (current, toasts);
    });
    load_when_signed_in(auth, load);

    let on_status = Callback::new(move |(id, status): (String, String)| {
        if saving.get_untracked() || status.trim().is_empty() {
            return;
        }
        saving.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_discrepancy_status(&id, &status).await {
                Ok(_) => {
                    crate::state::toast::notify(toasts, crate::state::toast::ToastKind::Success, "Estado actualizado.");
                    load.run(());
                }
                Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
            }
            saving.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, status);
    });

    let on_delete = Callback::new(move |id: String| {
        if saving.get_untracked() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message(&format!("¿Eliminar la discrepancia {id}?")).ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            saving.set(true);
            leptos::task::spawn_local(async move {
                match crate::net::api::delete_discrepancy(&id).await {
                    Ok(()) => {
                        crate::state::toast::notify(
                            toasts,
                            crate::state::toast::ToastKind::Success,
                            "Discrepancia eliminada.",
                        );
                        load.run(());
                    }
                    Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
                }
                saving.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });

    let row_actions = Callback::new(move |row: Value| -> AnyView {
        let Some(id) = row_id(&row) else {
            return ().into_any();
        };
        let id = StoredValue::new(id);
        view! {
            <div class="row-actions">
                <StatusSelect
                    value=Signal::stored(row_status(&row))
                    on_change=Callback::new(move |status: String| on_status.run((id.get_value(), status)))
                    disabled=saving
                />
                <RoleGuard allowed=vec![Role::Admin]>
                    <button
                        class="row-actions__delete"
                        title="Eliminar"
                        disabled=move || saving.get()
                        on:click=move |_| on_delete.run(id.get_value())
                    >
                        "Eliminar"
                    </button>
                </RoleGuard>
            </div>
        }
        .into_any()
    });

    view! {
        <section class="page page--details">
            <header class="page__header">
                <h1>"Detalle de discrepancias"</h1>
            </header>
            <FilterBar filters=filters on_apply=load show_status=true busy=loading />
            <Show when=move || loading.get()>
                <p class="page__loading">"Cargando..."</p>
            </Show>
            <DataTable
                rows=Signal::derive(move || discrepancies.with(rows_of))
                row_actions=row_actions
                empty_label="No hay discrepancias para los filtros elegidos."
            />
        </section>
    }
}
