//! Generic table over opaque backend rows.

use leptos::prelude::*;
use serde_json::Value;

use crate::util::format::humanize_key;
use crate::util::table::{cell_text, columns};

/// Table whose columns are derived from the rows themselves.
///
/// `row_actions` renders an extra trailing cell per row.
#[component]
pub fn DataTable(
    #[prop(into)] rows: Signal<Vec<Value>>,
    #[prop(optional)] row_actions: Option<Callback<Value, AnyView>>,
    #[prop(optional, into)] empty_label: Option<String>,
) -> impl IntoView {
    let cols = Memo::new(move |_| rows.with(|r| columns(r)));
    let empty_label = empty_label.unwrap_or_else(|| "Sin resultados.".to_owned());

    view! {
        <Show
            when=move || rows.with(|r| !r.is_empty())
            fallback=move || view! { <p class="data-table__empty">{empty_label.clone()}</p> }
        >
            <table class="data-table">
                <thead>
                    <tr>
                        {move || {
                            cols.get().into_iter().map(|c| view! { <th>{humanize_key(&c)}</th> }).collect_view()
                        }}
                        {row_actions.is_some().then(|| view! { <th class="data-table__actions">"Acciones"</th> })}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let cols = cols.get();
                        rows.get()
                            .into_iter()
                            .map(|row| {
                                let cells = cols
                                    .iter()
                                    .map(|c| view! { <td>{cell_text(row.get(c.as_str()).unwrap_or(&Value::Null))}</td> })
                                    .collect_view();
                                let actions = row_actions
                                    .map(|render| view! { <td class="data-table__actions">{render.run(row.clone())}</td> });
                                view! { <tr>{cells} {actions}</tr> }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </Show>
    }
}
