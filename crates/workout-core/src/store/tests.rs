//! Store Integration Tests
//!
//! Tests for MemoryStore through the store traits.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::domain::{AuthError, Identity, Item, ItemDraft, ItemPatch, NewItem, RemoteError};
    use crate::store::{AuthService, DocumentStore, MemoryStore, SnapshotListener};

    fn new_item(text: &str, owner: &str) -> NewItem {
        ItemDraft::new(text).into_new_item(owner).expect("valid draft")
    }

    fn recording_listener() -> (SnapshotListener, Rc<RefCell<Vec<Vec<Item>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let listener: SnapshotListener = Rc::new(move |snapshot: Vec<Item>| sink.borrow_mut().push(snapshot));
        (listener, seen)
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let store = MemoryStore::new();

        let created = store.sign_up("Ana@Example.com", "secret1").await.expect("sign up");
        assert_eq!(created.email.as_deref(), Some("ana@example.com"));
        assert_eq!(store.session(), Some(created.clone()));

        store.sign_out().await.unwrap();
        assert_eq!(store.session(), None);

        let signed_in = store.sign_in("ana@example.com", "secret1").await.expect("sign in");
        assert_eq!(signed_in.uid, created.uid);
    }

    #[tokio::test]
    async fn test_sign_up_rules() {
        let store = MemoryStore::new();
        assert_eq!(store.sign_up("no-at-sign", "secret1").await, Err(AuthError::InvalidEmail));
        assert_eq!(
            store.sign_up("a@b.c", "12345").await,
            Err(AuthError::WeakPassword { min: 6 })
        );
        store.sign_up("a@b.c", "123456").await.unwrap();
        assert_eq!(store.sign_up("A@B.C", "654321").await, Err(AuthError::EmailInUse));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let store = MemoryStore::new();
        store.sign_up("a@b.c", "123456").await.unwrap();
        store.sign_out().await.unwrap();

        assert_eq!(store.sign_in("a@b.c", "1234567").await, Err(AuthError::InvalidCredentials));
        assert_eq!(store.sign_in("x@b.c", "123456").await, Err(AuthError::InvalidCredentials));
        assert_eq!(store.session(), None);
    }

    #[tokio::test]
    async fn test_auth_listener_gets_current_state_then_changes() {
        let store = MemoryStore::new();
        let seen: Rc<RefCell<Vec<Option<Identity>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = store.on_auth_state_changed(Rc::new(move |id: Option<Identity>| sink.borrow_mut().push(id)));

        let identity = store.sign_up("a@b.c", "123456").await.unwrap();
        store.expire_session();
        assert_eq!(*seen.borrow(), vec![None, Some(identity), None]);

        sub.cancel();
        assert_eq!(store.auth_listener_count(), 0);
        store.sign_in("a@b.c", "123456").await.unwrap();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let first = store.create(&new_item("Squats", "u1")).await.unwrap();
        let second = store.create(&new_item("Lunges", "u1")).await.unwrap();
        assert_ne!(first, second);

        let a = store.get(&first).await.unwrap().expect("stored");
        let b = store.get(&second).await.unwrap().expect("stored");
        assert_eq!(a.text, "Squats");
        assert!(b.created_at > a.created_at);
    }

    #[tokio::test]
    async fn test_query_is_scoped_to_owner() {
        let store = MemoryStore::new();
        store.create(&new_item("Mine", "u1")).await.unwrap();
        store.create(&new_item("Theirs", "u2")).await.unwrap();

        let mine = store.query("u1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].text, "Mine");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let id = store.create(&new_item("Plank", "u1")).await.unwrap();

        store.update(&id, &ItemPatch::done(true)).await.unwrap();
        assert!(store.get(&id).await.unwrap().unwrap().done);

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
        // Deleting again is not an error
        store.delete(&id).await.unwrap();

        assert_eq!(
            store.update(&id, &ItemPatch::done(false)).await,
            Err(RemoteError::NotFound(id.clone()))
        );
    }

    #[tokio::test]
    async fn test_watch_delivers_initial_and_change_snapshots() {
        let store = MemoryStore::new();
        store.create(&new_item("Existing", "u1")).await.unwrap();

        let (listener, seen) = recording_listener();
        let _sub = store.watch("u1", listener);
        store.create(&new_item("Other owner", "u2")).await.unwrap();
        store.create(&new_item("New", "u1")).await.unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[1].len(), 2);
    }

    #[tokio::test]
    async fn test_deferred_delivery_waits_for_flush() {
        let store = MemoryStore::new();
        store.set_deferred(true);

        let (listener, seen) = recording_listener();
        let _sub = store.watch("u1", listener);
        store.create(&new_item("A", "u1")).await.unwrap();
        store.create(&new_item("B", "u1")).await.unwrap();
        assert!(seen.borrow().is_empty());

        // Pending notifications for one watcher coalesce into one snapshot
        assert_eq!(store.flush(), 1);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_watch_gets_nothing() {
        let store = MemoryStore::new();
        store.set_deferred(true);
        let (listener, seen) = recording_listener();
        let sub = store.watch("u1", listener);
        store.create(&new_item("A", "u1")).await.unwrap();

        sub.cancel();
        assert_eq!(store.active_watches(), 0);
        assert_eq!(store.flush(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failed_writes_are_counted_and_change_nothing() {
        let store = MemoryStore::new();
        store.fail_writes(true);

        let result = store.create(&new_item("A", "u1")).await;
        assert!(matches!(result, Err(RemoteError::Unavailable(_))));
        assert_eq!(store.write_calls(), 1);
        assert!(store.query("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signed_in_user_cannot_write_others_items() {
        let store = MemoryStore::new();
        let theirs = store.create(&new_item("Theirs", "u2")).await.unwrap();
        let me = store.sign_up("a@b.c", "123456").await.unwrap();

        assert_eq!(store.delete(&theirs).await, Err(RemoteError::PermissionDenied));
        assert_eq!(
            store.update(&theirs, &ItemPatch::done(true)).await,
            Err(RemoteError::PermissionDenied)
        );
        assert_eq!(
            store.create(&new_item("Forged", "u2")).await,
            Err(RemoteError::PermissionDenied)
        );
        let left = store.query("u2").await.unwrap();
        assert_eq!(left.len(), 1);
        assert!(!left[0].done);

        let mine = store.create(&new_item("Mine", me.uid())).await.unwrap();
        store.delete(&mine).await.unwrap();
    }
}
