//! Store Layer
//!
//! The remote store adapter seen from the app: hosted auth plus a document
//! collection with live queries. `MemoryStore` keeps everything in process.

mod memory;
mod subscription;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use subscription::Subscription;
pub use traits::{AuthListener, AuthService, DocumentStore, SnapshotListener};
