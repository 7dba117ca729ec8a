//! Store Layer - Core Traits
//!
//! Abstract interfaces for the hosted service.
//! Everything runs on the UI thread, so futures and listeners are not `Send`.

use std::rc::Rc;

use async_trait::async_trait;

use super::Subscription;
use crate::domain::{AuthError, Identity, Item, ItemId, ItemPatch, NewItem, RemoteError};

/// Receives the signed-in identity, or `None` once signed out
pub type AuthListener = Rc<dyn Fn(Option<Identity>)>;

/// Receives the full result set of a live query
pub type SnapshotListener = Rc<dyn Fn(Vec<Item>)>;

/// Hosted authentication
#[async_trait(?Send)]
pub trait AuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create an account; a successful sign-up also signs in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register for auth state changes.
    ///
    /// The listener is called once with the current state and again after
    /// every change until the subscription is cancelled.
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription;
}

/// Hosted document collection holding items
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Create a document, returning the id the store assigned
    async fn create(&self, item: &NewItem) -> Result<ItemId, RemoteError>;

    async fn get(&self, id: &str) -> Result<Option<Item>, RemoteError>;

    /// One-shot read of every item owned by `owner_id`
    async fn query(&self, owner_id: &str) -> Result<Vec<Item>, RemoteError>;

    /// Partial update of a single document
    async fn update(&self, id: &str, patch: &ItemPatch) -> Result<(), RemoteError>;

    async fn delete(&self, id: &str) -> Result<(), RemoteError>;

    /// Open a live query over items owned by `owner_id`.
    ///
    /// The listener gets the full snapshot once on registration and again
    /// after every change that touches the owner's items.
    fn watch(&self, owner_id: &str, listener: SnapshotListener) -> Subscription;
}
