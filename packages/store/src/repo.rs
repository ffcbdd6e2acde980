//! # Document store contract and typed collections
//!
//! [`DocumentStore`] is the contract the app holds with its backing database:
//! five single-shot operations plus a live subscription. Implementations live in
//! sibling modules ([`crate::memory`], [`crate::file_store`]).
//!
//! [`Collection`] layers a [`Record`] type over a store. Writes encode the record,
//! reads run the decode step, and subscriptions deliver decoded snapshots ordered
//! by the record's ordering field, newest first.
//!
//! | Method | Store semantics |
//! |--------|-----------------|
//! | [`add`](DocumentStore::add) | Inserts under a freshly generated id. |
//! | [`get`](DocumentStore::get) | `None` if absent. |
//! | [`set`](DocumentStore::set) | Creates or overwrites the document. |
//! | [`update`](DocumentStore::update) | Merges fields into an existing document; `NotFound` if absent. |
//! | [`delete`](DocumentStore::delete) | Removes the document; deleting an absent id succeeds and emits nothing. |
//! | [`subscribe`](DocumentStore::subscribe) | Delivers the current snapshot at once, then one per write to the collection. |

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::watch;

use crate::document::{Document, DocumentId, Fields, Snapshot};
use crate::error::StoreError;
use crate::models::{Record, Stored};
use crate::query::{Direction, Query};
use crate::subscription::Subscription;

/// Callback receiving every snapshot of a subscribed query.
pub type SnapshotListener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Async interface to a document database.
pub trait DocumentStore {
    fn get(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>>;
    fn add(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<DocumentId, StoreError>>;
    fn set(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StoreError>>;
    fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StoreError>>;
    fn delete(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> impl Future<Output = Result<(), StoreError>>;
    fn subscribe(&self, query: Query, listener: SnapshotListener) -> Subscription;
}

/// Typed access to the collection holding `T`.
pub struct Collection<S, T> {
    store: S,
    _record: PhantomData<fn() -> T>,
}

impl<S: Clone, T> Clone for Collection<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<S, T> std::fmt::Debug for Collection<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &std::any::type_name::<T>())
            .finish()
    }
}

impl<S: DocumentStore, T: Record + Send + Sync + 'static> Collection<S, T> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a record; returns it with its new id.
    pub async fn add(&self, record: T) -> Result<Stored<T>, StoreError> {
        let id = self.store.add(T::COLLECTION, record.encode()?).await?;
        tracing::debug!(collection = T::COLLECTION, %id, "added document");
        Ok(Stored { id, data: record })
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Option<Stored<T>>, StoreError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(T::decode(&doc)?)),
            None => Ok(None),
        }
    }

    /// Create or overwrite the record stored under `id`.
    pub async fn set(&self, id: &DocumentId, record: &T) -> Result<(), StoreError> {
        self.store.set(T::COLLECTION, id, record.encode()?).await
    }

    /// Write every field of `record` over the existing document.
    pub async fn update(&self, id: &DocumentId, record: &T) -> Result<(), StoreError> {
        self.store.update(T::COLLECTION, id, record.encode()?).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.store.delete(T::COLLECTION, id).await
    }

    fn query(&self) -> Query {
        let query = Query::collection(T::COLLECTION);
        match T::ORDER_BY {
            Some(field) => query.order_by(field, Direction::Descending),
            None => query,
        }
    }

    /// Subscribe to decoded snapshots of the whole collection.
    pub fn subscribe(
        &self,
        listener: impl Fn(Vec<Stored<T>>) + Send + Sync + 'static,
    ) -> Subscription {
        self.subscribe_query(self.query(), listener)
    }

    /// Subscribe to a single document; the listener sees `None` while it is absent.
    pub fn subscribe_document(
        &self,
        id: DocumentId,
        listener: impl Fn(Option<Stored<T>>) + Send + Sync + 'static,
    ) -> Subscription {
        self.subscribe_query(self.query().document(id), move |records| {
            listener(records.into_iter().next())
        })
    }

    fn subscribe_query(
        &self,
        query: Query,
        listener: impl Fn(Vec<Stored<T>>) + Send + Sync + 'static,
    ) -> Subscription {
        self.store.subscribe(
            query,
            Arc::new(move |snapshot: &Snapshot| listener(decode_snapshot(snapshot))),
        )
    }

    /// Subscription whose latest snapshot can be read or awaited.
    pub fn live(&self) -> LiveQuery<Vec<Stored<T>>> {
        let (sender, receiver) = watch::channel(Vec::new());
        let subscription = self.subscribe(move |records| {
            sender.send_replace(records);
        });
        LiveQuery {
            receiver,
            _subscription: subscription,
        }
    }

    pub fn live_document(&self, id: DocumentId) -> LiveQuery<Option<Stored<T>>> {
        let (sender, receiver) = watch::channel(None);
        let subscription = self.subscribe_document(id, move |record| {
            sender.send_replace(record);
        });
        LiveQuery {
            receiver,
            _subscription: subscription,
        }
    }
}

/// Decode a snapshot, skipping documents that do not match the schema.
fn decode_snapshot<T: Record>(snapshot: &Snapshot) -> Vec<Stored<T>> {
    snapshot
        .documents
        .iter()
        .filter_map(|doc| match T::decode(doc) {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(collection = %e.collection, id = %e.id, "skipping document: {}", e.source);
                None
            }
        })
        .collect()
}

/// Latest value of a live subscription. Dropping it cancels the subscription.
pub struct LiveQuery<V> {
    receiver: watch::Receiver<V>,
    _subscription: Subscription,
}

impl<V: Clone> LiveQuery<V> {
    /// The most recent snapshot.
    pub fn current(&mut self) -> V {
        self.receiver.borrow_and_update().clone()
    }

    /// Wait for the next snapshot. Never resolves to `None` while the store lives.
    pub async fn changed(&mut self) -> Option<V> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
