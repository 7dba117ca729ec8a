//! In-memory store
//!
//! Plays the hosted service inside the process: accounts, one session,
//! an item collection and live queries. Used by the demo mode and as the
//! test double for everything built on the store traits.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use async_trait::async_trait;

use super::traits::{AuthListener, AuthService, DocumentStore, SnapshotListener};
use super::Subscription;
use crate::domain::{
    AuthError, Identity, Item, ItemId, ItemPatch, NewItem, RemoteError, MIN_PASSWORD_LEN,
};

struct Account {
    uid: String,
    password_digest: String,
}

struct Watcher {
    owner_id: String,
    listener: SnapshotListener,
}

#[derive(Default)]
struct Inner {
    /// Keyed by normalized email
    accounts: HashMap<String, Account>,
    session: Option<Identity>,
    auth_watchers: BTreeMap<u64, AuthListener>,
    docs: BTreeMap<ItemId, Item>,
    doc_watchers: BTreeMap<u64, Watcher>,
    /// Watchers owed a snapshot while delivery is deferred
    pending: BTreeSet<u64>,
    deferred: bool,
    fail_writes: bool,
    write_calls: usize,
    next_id: u64,
    last_created_at: i64,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn snapshot(&self, owner_id: &str) -> Vec<Item> {
        self.docs
            .values()
            .filter(|item| item.is_owned_by(owner_id))
            .cloned()
            .collect()
    }

    fn watchers_for(&self, owner_id: &str) -> Vec<u64> {
        self.doc_watchers
            .iter()
            .filter(|(_, watcher)| watcher.owner_id == owner_id)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Count the call and fail it when writes are switched off.
    fn begin_write(&mut self) -> Result<(), RemoteError> {
        self.write_calls += 1;
        if self.fail_writes {
            return Err(RemoteError::Unavailable("store is rejecting writes".to_string()));
        }
        Ok(())
    }

    /// With a session open, only the signed-in owner may write.
    fn check_owner(&self, owner_id: &str) -> Result<(), RemoteError> {
        match &self.session {
            Some(identity) if identity.uid() != owner_id => Err(RemoteError::PermissionDenied),
            _ => Ok(()),
        }
    }

    /// Millisecond timestamp, strictly increasing across calls
    fn stamp(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_created_at = now.max(self.last_created_at + 1);
        self.last_created_at
    }
}

/// In-process stand-in for the hosted auth + document service.
///
/// Clones share the same state, so a clone can act as a second device.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue snapshots instead of delivering them during the write call.
    pub fn set_deferred(&self, deferred: bool) {
        self.inner.borrow_mut().deferred = deferred;
    }

    /// Deliver queued snapshots, returning how many listeners were served.
    pub fn flush(&self) -> usize {
        let pending: Vec<u64> = std::mem::take(&mut self.inner.borrow_mut().pending)
            .into_iter()
            .collect();
        self.deliver(pending)
    }

    /// Make every create/update/delete fail as if the backend rejected it.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Number of create/update/delete calls that reached the store
    pub fn write_calls(&self) -> usize {
        self.inner.borrow().write_calls
    }

    /// Live queries currently registered
    pub fn active_watches(&self) -> usize {
        self.inner.borrow().doc_watchers.len()
    }

    pub fn auth_listener_count(&self) -> usize {
        self.inner.borrow().auth_watchers.len()
    }

    pub fn session(&self) -> Option<Identity> {
        self.inner.borrow().session.clone()
    }

    /// Insert a document as if another client had written it.
    pub fn seed(&self, item: Item) {
        let owner_id = item.owner_id.clone();
        {
            let mut inner = self.inner.borrow_mut();
            inner.last_created_at = inner.last_created_at.max(item.created_at);
            inner.docs.insert(item.id.clone(), item);
        }
        self.notify_owner(&owner_id);
    }

    /// End the session without a sign-out call, like a revoked token.
    pub fn expire_session(&self) {
        self.set_session(None);
    }

    fn set_session(&self, session: Option<Identity>) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let changed = inner.session != session;
            inner.session = session;
            changed
        };
        if changed {
            self.notify_auth();
        }
    }

    fn notify_auth(&self) {
        let (listeners, session) = {
            let inner = self.inner.borrow();
            let listeners: Vec<AuthListener> = inner.auth_watchers.values().cloned().collect();
            (listeners, inner.session.clone())
        };
        for listener in listeners {
            listener(session.clone());
        }
    }

    fn notify_owner(&self, owner_id: &str) {
        let watcher_ids = {
            let mut inner = self.inner.borrow_mut();
            let ids = inner.watchers_for(owner_id);
            if inner.deferred {
                inner.pending.extend(ids);
                return;
            }
            ids
        };
        self.deliver(watcher_ids);
    }

    fn deliver(&self, watcher_ids: Vec<u64>) -> usize {
        // Snapshots are built before any listener runs; listeners may write back.
        let deliveries: Vec<(SnapshotListener, Vec<Item>)> = {
            let inner = self.inner.borrow();
            watcher_ids
                .iter()
                .filter_map(|id| inner.doc_watchers.get(id))
                .map(|watcher| (watcher.listener.clone(), inner.snapshot(&watcher.owner_id)))
                .collect()
        };
        let delivered = deliveries.len();
        for (listener, snapshot) in deliveries {
            listener(snapshot);
        }
        delivered
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Demo-only digest: unsalted and fast, so the in-tab accounts are not a
/// credential store. Real credentials stay with the hosted service.
fn password_digest(email: &str, password: &str) -> String {
    blake3::hash(format!("{email}\0{password}").as_bytes())
        .to_hex()
        .to_string()
}

#[async_trait(?Send)]
impl AuthService for MemoryStore {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize_email(email);
        let identity = {
            let inner = self.inner.borrow();
            let account = inner
                .accounts
                .get(&email)
                .filter(|account| account.password_digest == password_digest(&email, password))
                .ok_or(AuthError::InvalidCredentials)?;
            Identity::new(account.uid.clone(), Some(email))
        };
        self.set_session(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword { min: MIN_PASSWORD_LEN });
        }
        let identity = {
            let mut inner = self.inner.borrow_mut();
            if inner.accounts.contains_key(&email) {
                return Err(AuthError::EmailInUse);
            }
            let uid = format!("user-{}", inner.next_id());
            let password_digest = password_digest(&email, password);
            inner.accounts.insert(
                email.clone(),
                Account {
                    uid: uid.clone(),
                    password_digest,
                },
            );
            Identity::new(uid, Some(email))
        };
        log::info!("[MemoryStore] account created: {}", identity.uid());
        self.set_session(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_session(None);
        Ok(())
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        let (id, session) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.auth_watchers.insert(id, listener.clone());
            (id, inner.session.clone())
        };
        listener(session);

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().auth_watchers.remove(&id);
            }
        })
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn create(&self, item: &NewItem) -> Result<ItemId, RemoteError> {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.begin_write()?;
            if item.owner_id.is_empty() {
                return Err(RemoteError::PermissionDenied);
            }
            inner.check_owner(&item.owner_id)?;
            let id = format!("item-{}", inner.next_id());
            let created_at = inner.stamp();
            inner
                .docs
                .insert(id.clone(), Item::from_new(id.clone(), item.clone(), created_at));
            id
        };
        self.notify_owner(&item.owner_id);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, RemoteError> {
        Ok(self.inner.borrow().docs.get(id).cloned())
    }

    async fn query(&self, owner_id: &str) -> Result<Vec<Item>, RemoteError> {
        Ok(self.inner.borrow().snapshot(owner_id))
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), RemoteError> {
        let owner_id = {
            let mut inner = self.inner.borrow_mut();
            inner.begin_write()?;
            let owner_id = inner
                .docs
                .get(id)
                .map(|item| item.owner_id.clone())
                .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
            inner.check_owner(&owner_id)?;
            let Some(item) = inner.docs.get_mut(id) else {
                return Err(RemoteError::NotFound(id.to_string()));
            };
            patch.apply(item);
            item.owner_id.clone()
        };
        self.notify_owner(&owner_id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            inner.begin_write()?;
            if let Some(owner_id) = inner.docs.get(id).map(|item| item.owner_id.clone()) {
                inner.check_owner(&owner_id)?;
            }
            inner.docs.remove(id)
        };
        // Deleting a missing document succeeds, like the hosted store.
        if let Some(item) = removed {
            self.notify_owner(&item.owner_id);
        }
        Ok(())
    }

    fn watch(&self, owner_id: &str, listener: SnapshotListener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.doc_watchers.insert(
                id,
                Watcher {
                    owner_id: owner_id.to_string(),
                    listener,
                },
            );
            if inner.deferred {
                inner.pending.insert(id);
            }
            id
        };
        if !self.inner.borrow().deferred {
            self.deliver(vec![id]);
        }

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                inner.doc_watchers.remove(&id);
                inner.pending.remove(&id);
            }
        })
    }
}
