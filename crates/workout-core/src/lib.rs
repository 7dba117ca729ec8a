//! Workout Planner Core
//!
//! Layered like the app it serves:
//! - domain: items, identities, weekdays and the error taxonomy
//! - store: remote store adapter traits plus an in-memory implementation
//! - session / sync: the session gate and the live item list mirror
//! - routine: static weekday suggestions
//! - local: the offline task list variant

pub mod auth;
pub mod domain;
pub mod local;
pub mod route;
pub mod routine;
pub mod session;
pub mod store;
pub mod sync;

pub use domain::{
    AuthError, Identity, Item, ItemDraft, ItemId, ItemPatch, NewItem, RemoteError, SyncError,
    ValidationError, Weekday,
};
pub use route::Route;
pub use session::{SessionGate, SessionState};
pub use store::{AuthService, DocumentStore, MemoryStore, Subscription};
pub use sync::ItemListSync;
