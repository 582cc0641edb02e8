//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::toaster::Toaster;
use crate::pages::{
    dashboard::DashboardPage, details::DetailsPage, digital::DigitalPage, download::DownloadPage,
    forbidden::ForbiddenPage, historico::HistoricoPage, login::LoginPage, not_found::NotFoundPage,
    signup::SignupPage,
};
use crate::state::{auth::AuthState, toast::ToastState};
use crate::util::session_store;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and toast contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(auth);
    provide_context(toasts);

    // Effects only run in the browser, so SSR always renders the loading state.
    Effect::new(move || {
        auth.set(AuthState::resolved(session_store::load()));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/recon-dashboard.css"/>
        <Title text="Conciliaciones"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("details") view=DetailsPage/>
                    <Route path=StaticSegment("digital") view=DigitalPage/>
                    <Route path=StaticSegment("download") view=DownloadPage/>
                    <Route path=StaticSegment("historico") view=HistoricoPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("forbidden") view=ForbiddenPage/>
                </Routes>
            </main>
            <Toaster/>
        </Router>
    }
}
