//! Workout Planner App
//!
//! Picks the backend, mounts the session gate and switches between the
//! login, registration and list screens.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;
use workout_core::{
    AuthService, DocumentStore, ItemListSync, MemoryStore, Route, SessionGate, SessionState,
};

use crate::commands::{self, BridgeStore};
use crate::components::{LocalTodoApp, LoginForm, RegisterForm, WorkoutList};
use crate::config::{AppConfig, BackendMode};
use crate::context::AppContext;
use crate::router::Router;
use crate::store::{store_set_items, ListState};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let mode = config.resolve_mode(commands::bridge_available());
    log::info!("[APP] backend mode: {:?}", mode);

    match mode {
        BackendMode::Local => view! { <LocalTodoApp /> }.into_any(),
        BackendMode::Cloud | BackendMode::Demo => view! { <SyncedApp config=config mode=mode /> }.into_any(),
    }
}

/// Screens backed by an auth service and a live item query
#[component]
fn SyncedApp(config: AppConfig, mode: BackendMode) -> impl IntoView {
    let router = Router::new();
    let list = Store::new(ListState::default());
    let (session, set_session) = signal(SessionState::Unauthenticated);
    // Set once the gate has heard from the auth service
    let (session_resolved, set_session_resolved) = signal(false);

    let (auth, docs): (Rc<dyn AuthService>, Rc<dyn DocumentStore>) = match mode {
        BackendMode::Cloud => {
            let bridge = Rc::new(BridgeStore::new());
            (bridge.clone(), bridge)
        }
        BackendMode::Demo | BackendMode::Local => {
            let memory = Rc::new(MemoryStore::new());
            (memory.clone(), memory)
        }
    };

    let sync = ItemListSync::with_observer(docs, move |items| store_set_items(&list, items));

    let ctx = AppContext::new(router, list, session, config.error_display_ms, auth.clone(), sync.clone());
    provide_context(ctx);

    let follow = move |state: &SessionState| {
        if let Some(to) = state.redirect_from(router.route_untracked()) {
            router.navigate(to);
        }
    };

    // The gate only calls `navigate` for signed-out sessions
    let gate = SessionGate::mount(
        auth.as_ref(),
        move |_| {
            set_session_resolved.set(true);
            follow(&SessionState::Unauthenticated);
        },
        move |state: &SessionState| {
            set_session_resolved.set(true);
            match state.identity() {
                Some(identity) => sync.subscribe(identity),
                None => sync.unsubscribe(),
            }
            set_session.set(state.clone());
            follow(state);
        },
    );
    let gate = StoredValue::new_local(gate);

    // Back/forward into the list without a session
    Effect::new(move |_| {
        if router.route().requires_session()
            && session_resolved.get()
            && !session.with(SessionState::is_authenticated)
        {
            router.navigate(Route::Login);
        }
    });

    on_cleanup(move || {
        gate.try_update_value(|gate| gate.unmount());
        ctx.close();
    });

    view! {
        <div class="app-layout">
            {move || match router.route() {
                Route::Login => view! { <LoginForm /> }.into_any(),
                Route::Register => view! { <RegisterForm /> }.into_any(),
                Route::Main => view! { <WorkoutList /> }.into_any(),
            }}
            {(mode == BackendMode::Demo).then(|| view! {
                <p class="mode-note">"Modo demonstração: os dados ficam apenas nesta aba."</p>
            })}
        </div>
    }
}
