//! Workout List Component
//!
//! Main screen: the signed-in user's items, the add form and today's
//! suggestions.

use leptos::prelude::*;
use leptos::task::spawn_local;
use workout_core::auth;

use super::{ErrorBanner, ItemRow, NewItemForm, SuggestionPanel};
use crate::context::use_app_context;
use crate::messages::auth_message;
use crate::store::store_items;

#[component]
pub fn WorkoutList() -> impl IntoView {
    let ctx = use_app_context();
    let list = ctx.list;
    let (logout_error, set_logout_error) = signal::<Option<String>>(None);

    let logout = move |_| {
        spawn_local(async move {
            let service = ctx.auth();
            if let Err(err) = auth::logout(service.as_ref()).await {
                set_logout_error.set(Some(auth_message(&err)));
            }
        });
    };

    view! {
        <Show
            when=move || ctx.identity().is_some()
            fallback=|| view! { <p class="loading">"Carregando..."</p> }
        >
            <main class="main-content">
                <header class="list-header">
                    <h1>"🏋️ Meus Treinos"</h1>
                    <span class="user-name">
                        {move || ctx.identity().map(|identity| identity.display_name().to_string())}
                    </span>
                    <button class="logout-btn" on:click=logout>"Sair"</button>
                </header>
                {move || logout_error.get().map(|msg| view! { <p class="error-text">{msg}</p> })}

                <ErrorBanner />
                <NewItemForm />

                <ul class="task-list">
                    <For
                        each=move || store_items(&list)
                        key=|item| (item.id.clone(), item.done)
                        let:item
                    >
                        <ItemRow item=item />
                    </For>
                </ul>

                <p class="item-count">
                    {move || {
                        let items = store_items(&list);
                        let done = items.iter().filter(|item| item.done).count();
                        format!("{} de {} concluídos", done, items.len())
                    }}
                </p>

                <SuggestionPanel />
            </main>
        </Show>
    }
}
