//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use workout_core::{AuthService, Identity, ItemListSync, Route, SessionState, SyncError};

use crate::router::Router;
use crate::store::{store_report_error, ListStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub router: Router,
    pub list: ListStore,
    /// Current session as seen by the gate
    pub session: ReadSignal<SessionState>,
    /// How long a failed write stays visible
    pub error_display_ms: u32,
    auth: StoredValue<Rc<dyn AuthService>, LocalStorage>,
    sync: StoredValue<ItemListSync, LocalStorage>,
}

impl AppContext {
    pub fn new(
        router: Router,
        list: ListStore,
        session: ReadSignal<SessionState>,
        error_display_ms: u32,
        auth: Rc<dyn AuthService>,
        sync: ItemListSync,
    ) -> Self {
        Self {
            router,
            list,
            session,
            error_display_ms,
            auth: StoredValue::new_local(auth),
            sync: StoredValue::new_local(sync),
        }
    }

    pub fn auth(&self) -> Rc<dyn AuthService> {
        self.auth.get_value()
    }

    pub fn sync(&self) -> ItemListSync {
        self.sync.get_value()
    }

    /// Signed-in identity (tracked)
    pub fn identity(&self) -> Option<Identity> {
        self.session.with(|state| state.identity().cloned())
    }

    pub fn navigate(&self, route: Route) {
        self.router.navigate(route);
    }

    /// Run a write without blocking the UI; a failure ends up in the error banner.
    pub fn spawn_write<F>(&self, write: F)
    where
        F: Future<Output = Result<(), SyncError>> + 'static,
    {
        let list = self.list;
        spawn_local(async move {
            if let Err(err) = write.await {
                store_report_error(&list, &err);
            }
        });
    }

    /// Close the live query; used on teardown.
    pub fn close(&self) {
        self.sync.try_with_value(|sync| sync.unsubscribe());
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
