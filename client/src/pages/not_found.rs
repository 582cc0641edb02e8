//! Router fallback.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="page page--status">
            <h1>"404"</h1>
            <p>"La página que buscas no existe."</p>
            <a class="page__link" href="/">"Volver al inicio"</a>
        </section>
    }
}
