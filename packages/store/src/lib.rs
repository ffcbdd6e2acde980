//! Records, the document store contract, and its backends for the salon app.

pub mod document;
pub mod error;
pub mod filter;
pub mod models;
pub mod query;
pub mod repo;
pub mod subscription;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

pub use document::{Document, DocumentId, Fields, Snapshot};
pub use error::{DecodeError, StoreError};
pub use filter::{customer_matches, service_matches};
pub use models::{Customer, Price, Profile, Record, Service, ServiceCategory, Stored};
pub use query::{Direction, Query};
pub use repo::{Collection, DocumentStore, LiveQuery, SnapshotListener};
pub use subscription::{ListenerRegistry, Subscription};
