//! Item List Synchronizer
//!
//! Mirrors the current identity's items from a live query into local state
//! and forwards create/toggle/delete to the store.
//!
//! Writes are not applied locally: a change becomes visible only when the
//! store echoes it back through the live query. Every snapshot replaces the
//! whole mirror and is ordered by creation time.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::{Identity, Item, ItemDraft, ItemId, ItemPatch, SyncError};
use crate::routine::SuggestedItem;
use crate::store::{DocumentStore, SnapshotListener, Subscription};

/// Called with the mirrored list after every accepted snapshot
pub type SnapshotObserver = Rc<dyn Fn(&[Item])>;

struct ActiveQuery {
    owner_id: String,
    subscription: Subscription,
}

#[derive(Default)]
struct SyncState {
    mirror: RefCell<Vec<Item>>,
    active: RefCell<Option<ActiveQuery>>,
    /// Bumped on every subscribe/unsubscribe; snapshots carry the value they were opened with
    generation: Cell<u64>,
    last_error: RefCell<Option<SyncError>>,
    /// `done` values sent by toggles whose echo has not arrived yet
    pending_done: RefCell<HashMap<ItemId, bool>>,
    observer: RefCell<Option<SnapshotObserver>>,
}

impl SyncState {
    fn apply_snapshot(&self, generation: u64, mut items: Vec<Item>) {
        if generation != self.generation.get() {
            log::debug!("[Sync] dropping snapshot from closed query #{}", generation);
            return;
        }
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        log::debug!("[Sync] snapshot with {} items", items.len());
        self.pending_done.borrow_mut().retain(|id, target| {
            items
                .iter()
                .any(|item| &item.id == id && item.done != *target)
        });
        *self.mirror.borrow_mut() = items;
        self.notify();
    }

    fn notify(&self) {
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            let items = self.mirror.borrow().clone();
            observer(&items);
        }
    }
}

/// Handle to the synchronizer; clones share the same mirror and query.
#[derive(Clone)]
pub struct ItemListSync {
    store: Rc<dyn DocumentStore>,
    state: Rc<SyncState>,
}

impl ItemListSync {
    pub fn new(store: Rc<dyn DocumentStore>) -> Self {
        Self {
            store,
            state: Rc::new(SyncState::default()),
        }
    }

    pub fn with_observer(store: Rc<dyn DocumentStore>, observer: impl Fn(&[Item]) + 'static) -> Self {
        let sync = Self::new(store);
        sync.set_observer(observer);
        sync
    }

    pub fn set_observer(&self, observer: impl Fn(&[Item]) + 'static) {
        *self.state.observer.borrow_mut() = Some(Rc::new(observer));
    }

    /// Open the live query for `identity`, closing any previous one first.
    pub fn subscribe(&self, identity: &Identity) {
        self.unsubscribe();

        let generation = self.state.generation.get() + 1;
        self.state.generation.set(generation);

        let weak = Rc::downgrade(&self.state);
        let listener: SnapshotListener = Rc::new(move |snapshot: Vec<Item>| {
            if let Some(state) = weak.upgrade() {
                state.apply_snapshot(generation, snapshot);
            }
        });

        log::info!("[Sync] subscribing to items of {}", identity.uid());
        let subscription = self.store.watch(identity.uid(), listener);
        *self.state.active.borrow_mut() = Some(ActiveQuery {
            owner_id: identity.uid().to_string(),
            subscription,
        });
    }

    /// Close the live query and clear the mirror.
    pub fn unsubscribe(&self) {
        let active = self.state.active.borrow_mut().take();
        let Some(active) = active else {
            return;
        };
        self.state.generation.set(self.state.generation.get() + 1);
        log::info!("[Sync] unsubscribing from items of {}", active.owner_id);
        active.subscription.cancel();

        self.state.pending_done.borrow_mut().clear();
        let had_items = !self.state.mirror.borrow().is_empty();
        self.state.mirror.borrow_mut().clear();
        if had_items {
            self.state.notify();
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.active.borrow().is_some()
    }

    /// Owner of the open query
    pub fn owner_id(&self) -> Option<String> {
        self.state
            .active
            .borrow()
            .as_ref()
            .map(|active| active.owner_id.clone())
    }

    /// Current mirror, ordered by creation time
    pub fn items(&self) -> Vec<Item> {
        self.state.mirror.borrow().clone()
    }

    /// Most recent failed write, cleared by the next successful one
    pub fn last_error(&self) -> Option<SyncError> {
        self.state.last_error.borrow().clone()
    }

    /// Create an item stamped with the subscribed identity.
    ///
    /// Empty text or a missing owner fails before any store call.
    pub async fn create(&self, draft: ItemDraft) -> Result<ItemId, SyncError> {
        let owner_id = self.owner_id().unwrap_or_default();
        let result = match draft.into_new_item(&owner_id) {
            Ok(new_item) => self.store.create(&new_item).await.map_err(SyncError::from),
            Err(err) => Err(err.into()),
        };
        self.record("create", result)
    }

    /// Promote a suggestion through the same path as a typed entry.
    pub async fn promote(&self, suggestion: SuggestedItem) -> Result<ItemId, SyncError> {
        self.create(suggestion.into_draft()).await
    }

    /// Flip `done` on a mirrored item.
    ///
    /// A toggle still waiting for its echo counts as applied, so two quick
    /// toggles end where they started.
    pub async fn toggle(&self, id: &str) -> Result<(), SyncError> {
        let Some(mirrored) = self.mirrored(id) else {
            return self.record("toggle", Err(SyncError::UnknownItem(id.to_string())));
        };
        let current = self
            .state
            .pending_done
            .borrow()
            .get(id)
            .copied()
            .unwrap_or(mirrored.done);
        let target = !current;
        self.state.pending_done.borrow_mut().insert(id.to_string(), target);

        let result = self
            .store
            .update(id, &ItemPatch::done(target))
            .await
            .map_err(SyncError::from);
        if result.is_err() {
            let mut pending = self.state.pending_done.borrow_mut();
            if pending.get(id) == Some(&target) {
                pending.remove(id);
            }
        }
        self.record("toggle", result)
    }

    /// Delete a mirrored item; ids outside the current list are refused.
    pub async fn delete(&self, id: &str) -> Result<(), SyncError> {
        let result = match self.mirrored(id) {
            Some(_) => self.store.delete(id).await.map_err(SyncError::from),
            None => Err(SyncError::UnknownItem(id.to_string())),
        };
        self.record("delete", result)
    }

    fn mirrored(&self, id: &str) -> Option<Item> {
        self.state
            .mirror
            .borrow()
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    fn record<T>(&self, action: &str, result: Result<T, SyncError>) -> Result<T, SyncError> {
        match &result {
            Ok(_) => *self.state.last_error.borrow_mut() = None,
            Err(err) => {
                log::warn!("[Sync] {} failed: {}", action, err);
                *self.state.last_error.borrow_mut() = Some(err.clone());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RemoteError, ValidationError, Weekday};
    use crate::routine;
    use crate::store::MemoryStore;

    fn setup() -> (MemoryStore, ItemListSync) {
        let store = MemoryStore::new();
        let sync = ItemListSync::new(Rc::new(store.clone()));
        (store, sync)
    }

    fn user(uid: &str) -> Identity {
        Identity::new(uid, None)
    }

    fn remote_item(id: &str, text: &str, owner: &str, created_at: i64) -> Item {
        Item {
            id: id.to_string(),
            text: text.to_string(),
            done: false,
            owner_id: owner.to_string(),
            muscle_group: None,
            day: None,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_login_snapshot_toggle_echo() {
        let (store, sync) = setup();
        store.seed(remote_item("1", "Squats", "U", 1));

        sync.subscribe(&user("U"));
        let items = sync.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Squats");
        assert!(!items[0].done);

        sync.toggle("1").await.unwrap();
        assert_eq!(store.write_calls(), 1);
        assert!(sync.items()[0].done);
    }

    #[tokio::test]
    async fn test_create_appears_only_after_echo() {
        let (store, sync) = setup();
        store.set_deferred(true);
        sync.subscribe(&user("U"));
        store.flush();

        let id = sync.create(ItemDraft::new("Deadlift")).await.unwrap();
        assert!(sync.items().is_empty());

        store.flush();
        let items = sync.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].owner_id, "U");
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_store() {
        let (store, sync) = setup();
        sync.subscribe(&user("U"));

        let result = sync.create(ItemDraft::new("   ")).await;
        assert_eq!(result, Err(SyncError::Validation(ValidationError::EmptyText)));
        assert_eq!(store.write_calls(), 0);
        assert_eq!(sync.last_error(), Some(SyncError::Validation(ValidationError::EmptyText)));
    }

    #[tokio::test]
    async fn test_create_without_identity_is_rejected() {
        let (store, sync) = setup();
        let result = sync.create(ItemDraft::new("Run")).await;
        assert_eq!(result, Err(SyncError::Validation(ValidationError::MissingOwner)));
        assert_eq!(store.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_double_toggle_restores_done() {
        let (store, sync) = setup();
        store.seed(remote_item("1", "Squats", "U", 1));
        sync.subscribe(&user("U"));

        sync.toggle("1").await.unwrap();
        sync.toggle("1").await.unwrap();
        assert!(!sync.items()[0].done);
        assert_eq!(store.write_calls(), 2);
    }

    #[tokio::test]
    async fn test_double_toggle_before_echo_restores_done() {
        let (store, sync) = setup();
        store.set_deferred(true);
        store.seed(remote_item("1", "Squats", "U", 1));
        sync.subscribe(&user("U"));
        store.flush();

        sync.toggle("1").await.unwrap();
        sync.toggle("1").await.unwrap();
        assert!(!sync.items()[0].done);

        store.flush();
        assert_eq!(store.write_calls(), 2);
        assert!(!sync.items()[0].done);

        // Once echoed, the next toggle starts from the mirror again
        sync.toggle("1").await.unwrap();
        store.flush();
        assert!(sync.items()[0].done);
    }

    #[tokio::test]
    async fn test_failed_toggle_does_not_linger() {
        let (store, sync) = setup();
        store.seed(remote_item("1", "Squats", "U", 1));
        sync.subscribe(&user("U"));

        store.fail_writes(true);
        assert!(sync.toggle("1").await.is_err());
        assert!(!sync.items()[0].done);
        store.fail_writes(false);

        sync.toggle("1").await.unwrap();
        assert!(sync.items()[0].done);
    }

    #[tokio::test]
    async fn test_toggle_unknown_item() {
        let (store, sync) = setup();
        sync.subscribe(&user("U"));
        assert_eq!(sync.toggle("nope").await, Err(SyncError::UnknownItem("nope".to_string())));
        assert_eq!(store.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_is_echoed() {
        let (store, sync) = setup();
        store.seed(remote_item("1", "Squats", "U", 1));
        store.seed(remote_item("2", "Lunges", "U", 2));
        sync.subscribe(&user("U"));

        sync.delete("1").await.unwrap();
        let ids: Vec<_> = sync.items().into_iter().map(|item| item.id).collect();
        assert_eq!(ids, vec!["2".to_string()]);
    }

    #[tokio::test]
    async fn test_ownership_isolation() {
        let (store, sync_a) = setup();
        let sync_b = ItemListSync::new(Rc::new(store.clone()));
        sync_a.subscribe(&user("A"));
        sync_b.subscribe(&user("B"));

        sync_a.create(ItemDraft::new("A's run")).await.unwrap();
        sync_b.create(ItemDraft::new("B's swim")).await.unwrap();

        assert!(sync_a.items().iter().all(|item| item.owner_id == "A"));
        assert!(sync_b.items().iter().all(|item| item.owner_id == "B"));
        assert_eq!(sync_a.items().len(), 1);
        assert_eq!(sync_b.items().len(), 1);
    }

    #[tokio::test]
    async fn test_cannot_delete_another_owners_item() {
        let (store, sync_a) = setup();
        let sync_b = ItemListSync::new(Rc::new(store.clone()));
        store.seed(remote_item("b1", "B's swim", "B", 1));
        sync_a.subscribe(&user("A"));
        sync_b.subscribe(&user("B"));

        let result = sync_a.delete("b1").await;
        assert_eq!(result, Err(SyncError::UnknownItem("b1".to_string())));
        assert_eq!(store.write_calls(), 0);
        assert_eq!(sync_b.items().len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_sorted_by_creation() {
        let (store, sync) = setup();
        store.seed(remote_item("b", "Second", "U", 20));
        store.seed(remote_item("a", "Third", "U", 30));
        store.seed(remote_item("z", "First", "U", 10));
        sync.subscribe(&user("U"));

        let texts: Vec<_> = sync.items().into_iter().map(|item| item.text).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_resubscribe_cancels_previous_query() {
        let (store, sync) = setup();
        store.seed(remote_item("1", "A item", "A", 1));
        store.seed(remote_item("2", "B item", "B", 2));

        sync.subscribe(&user("A"));
        sync.subscribe(&user("B"));
        assert_eq!(store.active_watches(), 1);
        assert_eq!(sync.owner_id().as_deref(), Some("B"));

        // A change for A must not overwrite B's mirror
        store.seed(remote_item("3", "Another A item", "A", 3));
        let items = sync.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner_id, "B");
    }

    #[tokio::test]
    async fn test_stale_deferred_snapshot_is_dropped() {
        let (store, sync) = setup();
        store.set_deferred(true);
        store.seed(remote_item("1", "A item", "A", 1));

        sync.subscribe(&user("A"));
        sync.unsubscribe();
        store.flush();
        assert!(sync.items().is_empty());
        assert_eq!(store.active_watches(), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_clears_mirror_and_notifies() {
        let (store, sync) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        sync.set_observer(move |items: &[Item]| sink.borrow_mut().push(items.len()));
        store.seed(remote_item("1", "Squats", "U", 1));

        sync.subscribe(&user("U"));
        sync.unsubscribe();
        assert!(!sync.is_subscribed());
        assert!(sync.items().is_empty());
        assert_eq!(*seen.borrow(), vec![1, 0]);
    }

    #[tokio::test]
    async fn test_remote_failure_is_recorded_then_cleared() {
        let (store, sync) = setup();
        sync.subscribe(&user("U"));
        store.fail_writes(true);

        let result = sync.create(ItemDraft::new("Row")).await;
        assert!(matches!(result, Err(SyncError::RemoteWrite(RemoteError::Unavailable(_)))));
        assert!(sync.items().is_empty());
        assert!(sync.last_error().is_some());

        store.fail_writes(false);
        sync.create(ItemDraft::new("Row")).await.unwrap();
        assert_eq!(sync.last_error(), None);
        assert_eq!(sync.items().len(), 1);
    }

    #[tokio::test]
    async fn test_promoted_suggestion_is_stamped() {
        let (_store, sync) = setup();
        sync.subscribe(&user("U"));

        let suggestion = routine::generate(Weekday::Segunda).next().expect("monday has suggestions");
        sync.promote(suggestion.clone()).await.unwrap();

        let items = sync.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner_id, "U");
        assert_eq!(items[0].muscle_group.as_deref(), Some(suggestion.muscle_group.as_str()));
        assert_eq!(items[0].day, Some(Weekday::Segunda));
    }
}
