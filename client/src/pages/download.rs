//! Processed files and batch process execution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Any signed-in user can list and download processed files. Downloads are
//! plain links to `/api/recon/files/{name}`; the browser sends the auth
//! cookie itself. Running a backend process is limited to admins and
//! analysts and always asks for confirmation first.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use serde_json::Value;

use crate::components::role_guard::RoleGuard;
use crate::net::api::download_url;
use crate::net::types::Role;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::filters::ReconFilters;
use crate::state::toast::ToastState;
use crate::util::auth::{install_unauth_redirect, load_when_signed_in};
use crate::util::table::rows_of;

const FILE_NAME_KEYS: [&str; 4] = ["name", "file_name", "filename", "nombre"];

/// File name of a listing entry: a bare string or an object with a name field.
fn file_name_of(entry: &Value) -> Option<String> {
    let name = match entry {
        Value::String(s) => s.as_str(),
        Value::Object(map) => FILE_NAME_KEYS.iter().find_map(|k| map.get(*k).and_then(Value::as_str))?,
        _ => return None,
    };
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

fn validate_process_input(name: &str, params: &str) -> Result<(String, Value), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Indica el nombre del proceso.");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err("El nombre del proceso solo admite letras, números, '_' y '-'.");
    }
    if params.trim().is_empty() {
        return Ok((name.to_owned(), Value::Object(serde_json::Map::new())));
    }
    match serde_json::from_str::<Value>(params) {
        Ok(value @ Value::Object(_)) => Ok((name.to_owned(), value)),
        Ok(_) => Err("Los parámetros deben ser un objeto JSON."),
        Err(_) => Err("Los parámetros no son JSON válido."),
    }
}

#[component]
pub fn DownloadPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_unauth_redirect(auth, use_navigate());

    let files = RwSignal::new(Value::Null);
    let loading = RwSignal::new(false);

    let load = Callback::new(move |()| {
        if loading.get_untracked() {
            return;
        }
        loading.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_files(&ReconFilters::default()).await {
                Ok(data) => files.set(data),
                Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
            }
            loading.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = toasts;
    });
    load_when_signed_in(auth, load);

    let names = move || files.with(|f| rows_of(f).iter().filter_map(file_name_of).collect::<Vec<_>>());

    view! {
        <section class="page page--download">
            <header class="page__header">
                <h1>"Archivos procesados"</h1>
                <button class="page__refresh" on:click=move |_| load.run(()) disabled=move || loading.get()>
                    "Actualizar"
                </button>
            </header>
            <Show when=move || loading.get()>
                <p class="page__loading">"Cargando..."</p>
            </Show>
            <Show
                when=move || !names().is_empty()
                fallback=|| view! { <p class="data-table__empty">"No hay archivos disponibles."</p> }
            >
                <ul class="file-list">
                    {move || {
                        names()
                            .into_iter()
                            .map(|name| {
                                view! {
                                    <li class="file-list__item">
                                        <a href=download_url(&name) download=name.clone()>{name.clone()}</a>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
            <RoleGuard
                allowed=vec![Role::Admin, Role::Analyst]
                fallback=|| {
                    view! {
                        <p class="process-panel__locked">
                            "Solo administradores y analistas pueden ejecutar procesos."
                        </p>
                    }
                }
            >
                <ProcessPanel />
            </RoleGuard>
        </section>
    }
}

/// Form that triggers a named backend process.
#[component]
fn ProcessPanel() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let process = RwSignal::new(String::new());
    let params = RwSignal::new(String::new());
    let running = RwSignal::new(false);
    let last_result = RwSignal::new(None::<String>);

    let on_run = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if running.get() {
            return;
        }
        let (name, body) = match validate_process_input(&process.get(), &params.get()) {
            Ok(v) => v,
            Err(msg) => {
                crate::state::toast::notify(toasts, crate::state::toast::ToastKind::Error, msg);
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message(&format!("¿Ejecutar el proceso {name}?")).ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            running.set(true);
            leptos::task::spawn_local(async move {
                match crate::net::api::run_process(&name, &body).await {
                    Ok(result) => {
                        last_result.set(serde_json::to_string_pretty(&result).ok());
                        crate::state::toast::notify(
                            toasts,
                            crate::state::toast::ToastKind::Success,
                            format!("Proceso {name} enviado."),
                        );
                    }
                    Err(e) => crate::util::auth::report_failure(&e, auth, toasts),
                }
                running.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (name, body, auth);
    };

    view! {
        <form class="process-panel" on:submit=on_run>
            <h2>"Ejecutar proceso"</h2>
            <input
                class="process-panel__name"
                type="text"
                placeholder="conciliacion_diaria"
                prop:value=move || process.get()
                on:input=move |ev| process.set(event_target_value(&ev))
            />
            <textarea
                class="process-panel__params"
                placeholder="{\"fecha\": \"2024-05-01\"}"
                prop:value=move || params.get()
                on:input=move |ev| params.set(event_target_value(&ev))
            ></textarea>
            <button class="process-panel__run" type="submit" disabled=move || running.get()>
                "Ejecutar"
            </button>
            <Show when=move || last_result.get().is_some()>
                <pre class="process-panel__result">{move || last_result.get().unwrap_or_default()}</pre>
            </Show>
        </form>
    }
}
