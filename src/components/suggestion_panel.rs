//! Suggestion Panel Component
//!
//! Today's routine suggestions; each one can be added to the list.

use leptos::prelude::*;
use workout_core::routine::{self, SuggestedItem};
use workout_core::Weekday;

use crate::context::use_app_context;

#[component]
pub fn SuggestionPanel() -> impl IntoView {
    let (day, set_day) = signal(Weekday::today());

    view! {
        <section class="suggestion-panel">
            <div class="suggestion-header">
                <h3>"Sugestões de treino"</h3>
                <select on:change=move |ev| {
                    if let Some(selected) = Weekday::from_label(&event_target_value(&ev)) {
                        set_day.set(selected);
                    }
                }>
                    {Weekday::ALL.into_iter().map(|option| view! {
                        <option value=option.label() selected=move || day.get() == option>
                            {option.label()}
                        </option>
                    }).collect_view()}
                </select>
            </div>

            {move || {
                let suggestions = routine::generate(day.get());
                if suggestions.day().is_rest_day() {
                    view! { <p class="rest-day">{format!("{} é dia de descanso.", suggestions.day().label())}</p> }.into_any()
                } else {
                    view! {
                        <ul class="suggestion-list">
                            {suggestions.map(|suggestion| view! { <SuggestionRow suggestion=suggestion /> }).collect_view()}
                        </ul>
                    }.into_any()
                }
            }}
        </section>
    }
}

#[component]
fn SuggestionRow(suggestion: SuggestedItem) -> impl IntoView {
    let ctx = use_app_context();
    let text = suggestion.text.clone();

    view! {
        <li class="suggestion-row">
            <span class="suggestion-text">{text}</span>
            <button
                class="suggestion-add"
                on:click=move |_| {
                    let sync = ctx.sync();
                    let suggestion = suggestion.clone();
                    ctx.spawn_write(async move { sync.promote(suggestion).await.map(|_| ()) });
                }
            >
                "Adicionar"
            </button>
        </li>
    }
}
