//! # Filesystem-backed document store
//!
//! [`FileStore`] keeps every collection in memory (a [`MemoryStore`]). Each
//! change is written to disk as the whole updated collection first; memory and
//! subscribers only see it once that write succeeded. It is what the mobile app runs on, so records survive restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── services.json      # { "<id>": { ...fields }, ... }
//! ├── customers.json
//! ├── users.json
//! └── accounts.json
//! ```
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/salon/` |
//! | Linux | `~/.local/share/salon/` |
//! | Android | App-internal storage (via `dirs`) |

use std::path::{Path, PathBuf};

use crate::document::{Document, DocumentId, Fields};
use crate::error::StoreError;
use crate::memory::{Collections, Documents, MemoryStore};
use crate::query::Query;
use crate::repo::{DocumentStore, SnapshotListener};
use crate::subscription::Subscription;

/// Persistent DocumentStore for desktop and mobile.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the store at `base`, loading any collections already on disk.
    pub fn open(base: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base = base.into();
        std::fs::create_dir_all(&base)?;

        let mut collections = Collections::new();
        for entry in std::fs::read_dir(&base)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let raw = std::fs::read_to_string(&path)?;
            let docs: Documents = serde_json::from_str(&raw)?;
            tracing::debug!(collection = name, count = docs.len(), "loaded collection");
            collections.insert(name.to_string(), docs);
        }

        Ok(Self {
            base,
            inner: MemoryStore::with_collections(collections),
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base.join(format!("{collection}.json"))
    }

    fn persist(&self, collection: &str, docs: &Documents) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(docs)?;
        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl DocumentStore for FileStore {
    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.inner.read(collection, id))
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        self.inner
            .add_with(collection, fields, |docs| self.persist(collection, docs))
    }

    async fn set(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError> {
        self.inner
            .set_with(collection, id, fields, |docs| self.persist(collection, docs))
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Fields,
    ) -> Result<(), StoreError> {
        self.inner
            .update_with(collection, id, fields, |docs| self.persist(collection, docs))
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        self.inner
            .delete_with(collection, id, |docs| self.persist(collection, docs))
    }

    fn subscribe(&self, query: Query, listener: SnapshotListener) -> Subscription {
        self.inner.subscribe(query, listener)
    }
}
