//! Collector, date range, and status filters.

use leptos::prelude::*;

use crate::components::status_select::StatusSelect;
use crate::state::filters::ReconFilters;
use crate::state::toast::{ToastKind, ToastState, notify};

/// Filter form bound to a shared `ReconFilters` signal.
///
/// `on_apply` fires on submit and after clearing; an inverted date range is
/// reported as a toast instead.
#[component]
pub fn FilterBar(
    filters: RwSignal<ReconFilters>,
    on_apply: Callback<()>,
    #[prop(optional)] show_status: bool,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if filters.with_untracked(ReconFilters::has_inverted_range) {
            notify(toasts, ToastKind::Error, "La fecha inicial es posterior a la final.");
            return;
        }
        on_apply.run(());
    };

    let on_clear = move |_| {
        filters.set(ReconFilters::default());
        on_apply.run(());
    };

    view! {
        <form class="filter-bar" on:submit=on_submit>
            <label class="filter-bar__field">
                <span>"Recaudador"</span>
                <input
                    type="text"
                    placeholder="visa, amex..."
                    prop:value=move || filters.with(|f| f.collector.clone())
                    on:input=move |ev| filters.update(|f| f.collector = event_target_value(&ev))
                />
            </label>
            <label class="filter-bar__field">
                <span>"Desde"</span>
                <input
                    type="date"
                    prop:value=move || filters.with(|f| f.date_from.clone())
                    on:input=move |ev| filters.update(|f| f.date_from = event_target_value(&ev))
                />
            </label>
            <label class="filter-bar__field">
                <span>"Hasta"</span>
                <input
                    type="date"
                    prop:value=move || filters.with(|f| f.date_to.clone())
                    on:input=move |ev| filters.update(|f| f.date_to = event_target_value(&ev))
                />
            </label>
            <Show when=move || show_status>
                <label class="filter-bar__field">
                    <span>"Estado"</span>
                    <StatusSelect
                        value=Signal::derive(move || filters.with(|f| f.status.clone()))
                        on_change=Callback::new(move |status: String| filters.update(|f| f.status = status))
                        allow_any=true
                        disabled=busy
                    />
                </label>
            </Show>
            <button class="filter-bar__apply" type="submit" disabled=move || busy.get()>
                "Filtrar"
            </button>
            <button class="filter-bar__clear" type="button" on:click=on_clear disabled=move || busy.get()>
                "Limpiar"
            </button>
        </form>
    }
}
