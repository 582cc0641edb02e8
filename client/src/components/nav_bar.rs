//! Top navigation with the current user and logout.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::AuthState;

const LINKS: [(&str, &str); 5] = [
    ("/", "Resumen"),
    ("/details", "Detalles"),
    ("/digital", "Digital"),
    ("/download", "Descargas"),
    ("/historico", "Histórico"),
];

/// Navigation bar, shown only while a user is signed in.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let busy = RwSignal::new(false);

    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            crate::util::session_store::clear();
            auth.set(AuthState::resolved(None));
            busy.set(false);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(crate::util::auth::LOGIN_PATH);
            }
        });
    };

    let user_label = move || {
        auth.get()
            .user
            .map(|u| format!("{} · {}", u.name, u.role.label()))
            .unwrap_or_default()
    };

    view! {
        <Show when=move || auth.get().user.is_some()>
            <nav class="nav-bar">
                <span class="nav-bar__brand">"Conciliaciones"</span>
                <ul class="nav-bar__links">
                    {LINKS
                        .into_iter()
                        .map(|(href, label)| {
                            view! {
                                <li>
                                    <A href=href>{label}</A>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <span class="nav-bar__user">{user_label}</span>
                <button class="nav-bar__logout" on:click=on_logout disabled=move || busy.get()>
                    "Cerrar sesión"
                </button>
            </nav>
        </Show>
    }
}
