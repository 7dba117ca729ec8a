//! Error Banner Component
//!
//! Shows the last failed write for a few seconds.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_clear_error, store_error_version, store_last_error};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_app_context();
    let list = ctx.list;

    // Each report gets its own timer; a stale timer finds a newer version and does nothing.
    Effect::new(move |_| {
        let version = store_error_version(&list);
        if version == 0 {
            return;
        }
        Timeout::new(ctx.error_display_ms, move || store_clear_error(&list, version)).forget();
    });

    let dismiss = move |_| {
        let version = untrack(|| store_error_version(&list));
        store_clear_error(&list, version);
    };

    view! {
        {move || store_last_error(&list).map(|msg| view! {
            <div class="error-banner" role="alert">
                <span>{msg}</span>
                <button class="error-dismiss" on:click=dismiss>"×"</button>
            </div>
        })}
    }
}
