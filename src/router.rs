//! Router
//!
//! Keeps the current screen in a signal and mirrors it to the address bar.

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use workout_core::Route;

#[derive(Clone, Copy)]
pub struct Router {
    route: RwSignal<Route>,
}

impl Router {
    /// Start from the current location and follow back/forward navigation.
    pub fn new() -> Self {
        let initial = current_path()
            .map(|path| Route::from_path(&path))
            .unwrap_or_default();
        let route = RwSignal::new(initial);

        let _ = window_event_listener(leptos::ev::popstate, move |_| {
            if let Some(path) = current_path() {
                route.set(Route::from_path(&path));
            }
        });

        Self { route }
    }

    /// Current screen (tracked)
    pub fn route(&self) -> Route {
        self.route.get()
    }

    pub fn route_untracked(&self) -> Route {
        self.route.get_untracked()
    }

    pub fn navigate(&self, to: Route) {
        if self.route.get_untracked() == to {
            return;
        }
        log::debug!("[Router] {} -> {}", self.route.get_untracked(), to);
        if let Some(history) = web_sys::window().and_then(|window| window.history().ok()) {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(to.path())) {
                log::warn!("[Router] pushState failed: {:?}", e);
            }
        }
        self.route.set(to);
    }
}

fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}
