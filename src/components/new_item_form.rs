//! New Item Form Component
//!
//! Text plus optional muscle group and day. The input clears once the
//! store accepts the write; the item itself shows up with the next snapshot.

use leptos::prelude::*;
use leptos::task::spawn_local;
use workout_core::{ItemDraft, Weekday};

use crate::context::use_app_context;
use crate::store::store_report_error;

#[component]
pub fn NewItemForm() -> impl IntoView {
    let ctx = use_app_context();

    let (new_text, set_new_text) = signal(String::new());
    let (muscle_group, set_muscle_group) = signal(String::new());
    let (day, set_day) = signal::<Option<Weekday>>(None);

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = ItemDraft::new(new_text.get_untracked())
            .with_muscle_group(muscle_group.get_untracked())
            .with_day(day.get_untracked());
        let sync = ctx.sync();

        spawn_local(async move {
            match sync.create(draft).await {
                Ok(_) => {
                    set_new_text.set(String::new());
                    set_muscle_group.set(String::new());
                }
                Err(err) => {
                    store_report_error(&ctx.list, &err);
                }
            }
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="Digite uma tarefa..."
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
                <button type="submit">"Adicionar"</button>
            </div>

            <div class="new-item-details">
                <input
                    type="text"
                    placeholder="Grupo muscular (opcional)"
                    prop:value=move || muscle_group.get()
                    on:input=move |ev| set_muscle_group.set(event_target_value(&ev))
                />
                <select on:change=move |ev| set_day.set(Weekday::from_label(&event_target_value(&ev)))>
                    <option value="" selected=move || day.get().is_none()>"Sem dia"</option>
                    {Weekday::ALL.into_iter().map(|option| view! {
                        <option value=option.label() selected=move || day.get() == Some(option)>
                            {option.label()}
                        </option>
                    }).collect_view()}
                </select>
            </div>
        </form>
    }
}
