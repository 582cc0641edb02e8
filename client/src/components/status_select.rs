//! Discrepancy status picker.

#[cfg(test)]
#[path = "status_select_test.rs"]
mod status_select_test;

use leptos::prelude::*;

/// Review statuses the backend accepts, with display labels.
pub const STATUSES: [(&str, &str); 4] = [
    ("pending", "Pendiente"),
    ("in_review", "En revisión"),
    ("resolved", "Resuelta"),
    ("dismissed", "Descartada"),
];

/// Display label for a status value; unknown values show as-is.
#[must_use]
pub fn status_label(value: &str) -> &str {
    STATUSES
        .iter()
        .find(|(v, _)| *v == value)
        .map_or(value, |(_, label)| label)
}

/// `<select>` over the known statuses. With `allow_any`, an empty "all"
/// option comes first.
#[component]
pub fn StatusSelect(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional)] allow_any: bool,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <select
            class="status-select"
            prop:value=move || value.get()
            disabled=move || disabled.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            {allow_any.then(|| view! { <option value="">"Todos"</option> })}
            {STATUSES
                .into_iter()
                .map(|(v, label)| view! { <option value=v>{label}</option> })
                .collect_view()}
        </select>
    }
}
