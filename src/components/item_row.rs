//! Item Row Component
//!
//! One mirrored item: checkbox, text, workout tags and a two-step delete.
//! The row never changes itself; it re-renders when the next snapshot arrives.

use leptos::prelude::*;
use workout_core::Item;

use crate::context::use_app_context;

#[component]
pub fn ItemRow(item: Item) -> impl IntoView {
    let ctx = use_app_context();
    let (confirming, set_confirming) = signal(false);

    let done = item.done;
    let toggle_id = item.id.clone();
    let delete_id = item.id.clone();
    let confirm_text = format!("Excluir \"{}\"?", item.text);
    let tags = [item.muscle_group.clone(), item.day.map(|day| day.label().to_string())]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    view! {
        <li class=move || if done { "item-row done" } else { "item-row" }>
            <input
                type="checkbox"
                prop:checked=done
                on:click=move |ev| {
                    // The box keeps the mirrored value until the store echoes the change
                    ev.prevent_default();
                    let sync = ctx.sync();
                    let id = toggle_id.clone();
                    ctx.spawn_write(async move { sync.toggle(&id).await });
                }
            />
            <span class="item-text">{item.text}</span>
            {tags.into_iter().map(|tag| view! { <span class="item-tag">{tag}</span> }).collect_view()}
            <Show
                when=move || confirming.get()
                fallback=move || view! {
                    <button class="delete-btn" title="Excluir" on:click=move |_| set_confirming.set(true)>
                        "×"
                    </button>
                }
            >
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{confirm_text.clone()}</span>
                    <button
                        class="confirm-btn"
                        on:click={
                            let delete_id = delete_id.clone();
                            move |_| {
                                set_confirming.set(false);
                                let sync = ctx.sync();
                                let id = delete_id.clone();
                                ctx.spawn_write(async move { sync.delete(&id).await });
                            }
                        }
                    >
                        "Excluir"
                    </button>
                    <button class="cancel-btn" on:click=move |_| set_confirming.set(false)>
                        "Cancelar"
                    </button>
                </span>
            </Show>
        </li>
    }
}
