//! Domain Layer
//!
//! Entities and errors shared by every other module.
//! No I/O lives here.

mod error;
mod identity;
mod item;
mod weekday;

pub use error::{AuthError, RemoteError, SyncError, ValidationError, MIN_PASSWORD_LEN};
pub use identity::Identity;
pub use item::{Item, ItemDraft, ItemId, ItemPatch, NewItem};
pub use weekday::Weekday;
