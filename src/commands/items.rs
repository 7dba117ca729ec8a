//! Item Commands
//!
//! `DocumentStore` over the bridge.

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use workout_core::store::SnapshotListener;
use workout_core::{DocumentStore, Item, ItemId, ItemPatch, NewItem, RemoteError, Subscription};

use super::{bridge_watch_items, call, release, BridgeStore};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateItemArgs<'a> {
    item: &'a NewItem,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct OwnerArgs<'a> {
    #[serde(rename = "ownerId")]
    owner_id: &'a str,
}

#[derive(Serialize)]
struct UpdateItemArgs<'a> {
    id: &'a str,
    patch: &'a ItemPatch,
}

// ========================
// Commands
// ========================

#[async_trait(?Send)]
impl DocumentStore for BridgeStore {
    async fn create(&self, item: &NewItem) -> Result<ItemId, RemoteError> {
        Ok(call("create_item", &CreateItemArgs { item }).await?)
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, RemoteError> {
        Ok(call("get_item", &IdArgs { id }).await?)
    }

    async fn query(&self, owner_id: &str) -> Result<Vec<Item>, RemoteError> {
        Ok(call("list_items", &OwnerArgs { owner_id }).await?)
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), RemoteError> {
        Ok(call("update_item", &UpdateItemArgs { id, patch }).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        Ok(call("delete_item", &IdArgs { id }).await?)
    }

    fn watch(&self, owner_id: &str, listener: SnapshotListener) -> Subscription {
        let callback = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<Item>>(value) {
                Ok(items) => listener(items),
                Err(e) => log::warn!("[Bridge] unreadable snapshot skipped: {}", e),
            }
        });
        let unsubscribe = bridge_watch_items(owner_id, &callback);

        Subscription::new(move || {
            release(&unsubscribe);
            drop(callback);
        })
    }
}
