//! Shown when the session role is not allowed on a route.

use leptos::prelude::*;

#[component]
pub fn ForbiddenPage() -> impl IntoView {
    view! {
        <section class="page page--status">
            <h1>"Acceso denegado"</h1>
            <p>"Tu rol no tiene permiso para ver esta sección."</p>
            <a class="page__link" href="/">"Volver al inicio"</a>
        </section>
    }
}
