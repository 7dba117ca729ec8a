//! List State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use workout_core::{Item, SyncError};

use crate::messages::sync_message;

/// State of the main list screen with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ListState {
    /// Mirror of the live query, already ordered
    pub items: Vec<Item>,
    /// Last failed write, as shown to the user
    pub last_error: Option<String>,
    /// Bumped for every reported error so stale timers don't clear a newer one
    pub error_version: u32,
}

/// Type alias for the store
pub type ListStore = Store<ListState>;

// ========================
// Store Helper Functions
// ========================

/// Mirrored items (tracked)
pub fn store_items(store: &ListStore) -> Vec<Item> {
    store.items().get()
}

pub fn store_set_items(store: &ListStore, items: &[Item]) {
    *store.items().write() = items.to_vec();
}

pub fn store_last_error(store: &ListStore) -> Option<String> {
    store.last_error().get()
}

pub fn store_error_version(store: &ListStore) -> u32 {
    store.error_version().get()
}

/// Show a failed write and return its version for later clearing
pub fn store_report_error(store: &ListStore, err: &SyncError) -> u32 {
    store.last_error().set(Some(sync_message(err)));
    store.error_version().update(|v| *v += 1);
    store.error_version().get_untracked()
}

/// Clear the error only if nothing newer was reported since `version`
pub fn store_clear_error(store: &ListStore, version: u32) {
    if store.error_version().get_untracked() == version {
        store.last_error().set(None);
    }
}
