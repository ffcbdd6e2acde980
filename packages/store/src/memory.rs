use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::document::{Document, DocumentId, Fields, Snapshot};
use crate::error::StoreError;
use crate::query::Query;
use crate::repo::{DocumentStore, SnapshotListener};
use crate::subscription::{ListenerRegistry, Subscription};

pub(crate) type Documents = BTreeMap<DocumentId, Fields>;
pub(crate) type Collections = HashMap<String, Documents>;

/// In-memory DocumentStore for testing and as the engine behind [`crate::FileStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<Collections>>,
    listeners: ListenerRegistry<(Query, SnapshotListener)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_collections(collections: Collections) -> Self {
        Self {
            collections: Arc::new(Mutex::new(collections)),
            listeners: ListenerRegistry::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Documents of a collection as stored, keyed by id.
    pub(crate) fn collection_fields(&self, collection: &str) -> Documents {
        self.lock().get(collection).cloned().unwrap_or_default()
    }

    pub(crate) fn read(&self, collection: &str, id: &DocumentId) -> Option<Document> {
        self.lock()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id.clone(), fields.clone()))
    }

    /// Apply `change` to a copy of `collection`, hand the copy to `save`, and
    /// only then install it. Nothing is installed when either step fails, or
    /// when `change` returns `false` to report that nothing changed.
    pub(crate) fn commit(
        &self,
        collection: &str,
        change: impl FnOnce(&mut Documents) -> Result<bool, StoreError>,
        save: impl FnOnce(&Documents) -> Result<(), StoreError>,
    ) -> Result<bool, StoreError> {
        let mut collections = self.lock();
        let mut docs = collections.get(collection).cloned().unwrap_or_default();
        if !change(&mut docs)? {
            return Ok(false);
        }
        save(&docs)?;
        collections.insert(collection.to_string(), docs);
        Ok(true)
    }

    pub(crate) fn add_with(
        &self,
        collection: &str,
        fields: Fields,
        save: impl FnOnce(&Documents) -> Result<(), StoreError>,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        self.commit(
            collection,
            |docs| {
                docs.insert(id.clone(), fields);
                Ok(true)
            },
            save,
        )?;
        self.notify(collection);
        Ok(id)
    }

    pub(crate) fn set_with(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Fields,
        save: impl FnOnce(&Documents) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        self.commit(
            collection,
            |docs| {
                docs.insert(id.clone(), fields);
                Ok(true)
            },
            save,
        )?;
        self.notify(collection);
        Ok(())
    }

    pub(crate) fn update_with(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Fields,
        save: impl FnOnce(&Documents) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        self.commit(
            collection,
            |docs| {
                let existing = docs.get_mut(id).ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.clone(),
                })?;
                existing.extend(fields);
                Ok(true)
            },
            save,
        )?;
        self.notify(collection);
        Ok(())
    }

    /// Missing ids are a no-op: nothing is saved and nobody is notified.
    pub(crate) fn delete_with(
        &self,
        collection: &str,
        id: &DocumentId,
        save: impl FnOnce(&Documents) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        if self.commit(collection, |docs| Ok(docs.remove(id).is_some()), save)? {
            self.notify(collection);
        }
        Ok(())
    }

    fn snapshot(&self, query: &Query) -> Snapshot {
        let docs: Vec<Document> = self
            .collection_fields(&query.collection)
            .into_iter()
            .map(|(id, fields)| Document::new(id, fields))
            .collect();
        Snapshot {
            documents: query.apply(&docs),
        }
    }

    /// Deliver a fresh snapshot to every subscription on `collection`.
    pub(crate) fn notify(&self, collection: &str) {
        self.listeners.for_each(|(query, listener)| {
            if query.collection == collection {
                listener(&self.snapshot(query));
            }
        });
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.read(collection, id))
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        self.add_with(collection, fields, |_| Ok(()))
    }

    async fn set(&self, collection: &str, id: &DocumentId, fields: Fields) -> Result<(), StoreError> {
        self.set_with(collection, id, fields, |_| Ok(()))
    }

    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Fields,
    ) -> Result<(), StoreError> {
        self.update_with(collection, id, fields, |_| Ok(()))
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        self.delete_with(collection, id, |_| Ok(()))
    }

    fn subscribe(&self, query: Query, listener: SnapshotListener) -> Subscription {
        let initial = self.snapshot(&query);
        let subscription = self.listeners.register((query, Arc::clone(&listener)));
        listener(&initial);
        subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn counting_listener(count: &Arc<AtomicUsize>, last_len: &Arc<AtomicUsize>) -> SnapshotListener {
        let count = Arc::clone(count);
        let last_len = Arc::clone(last_len);
        Arc::new(move |snapshot: &Snapshot| {
            count.fetch_add(1, Ordering::SeqCst);
            last_len.store(snapshot.documents.len(), Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let store = MemoryStore::new();
        let id = store
            .add("customers", fields(json!({ "name": "Lan" })))
            .await
            .unwrap();

        let doc = store.get("customers", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("name"), Some(&json!("Lan")));
        assert!(store.get("customers", &DocumentId::from("nope")).await.unwrap().is_none());
        assert!(store.get("services", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .add("customers", fields(json!({ "name": "Lan", "phone": "1" })))
            .await
            .unwrap();
        store
            .update("customers", &id, fields(json!({ "phone": "2" })))
            .await
            .unwrap();

        let doc = store.get("customers", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("name"), Some(&json!("Lan")));
        assert_eq!(doc.get("phone"), Some(&json!("2")));
    }

    #[tokio::test]
    async fn test_subscribe_delivers_initial_snapshot_then_changes() {
        let store = MemoryStore::new();
        store.add("customers", fields(json!({}))).await.unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let last_len = Arc::new(AtomicUsize::new(0));
        let sub = store.subscribe(
            Query::collection("customers"),
            counting_listener(&count, &last_len),
        );
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(last_len.load(Ordering::SeqCst), 1);

        store.add("customers", fields(json!({}))).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(last_len.load(Ordering::SeqCst), 2);

        // Writes elsewhere do not wake this subscription.
        store.add("services", fields(json!({}))).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        sub.cancel();
        store.add("customers", fields(json!({}))).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_document_is_silent_noop() {
        let store = MemoryStore::new();
        store.add("customers", fields(json!({}))).await.unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let last_len = Arc::new(AtomicUsize::new(0));
        let _sub = store.subscribe(
            Query::collection("customers"),
            counting_listener(&count, &last_len),
        );

        store
            .delete("customers", &DocumentId::from("does-not-exist"))
            .await
            .unwrap();

        // Listing subscription is untouched and still live.
        assert_eq!(count.load(Ordering::SeqCst), 1);
        store.add("customers", fields(json!({}))).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(last_len.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_listener_may_cancel_itself() {
        let store = MemoryStore::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::default();
        let hits = Arc::new(AtomicUsize::new(0));

        let slot_in_listener = Arc::clone(&slot);
        let hits_in_listener = Arc::clone(&hits);
        let sub = store.subscribe(
            Query::collection("customers"),
            Arc::new(move |_: &Snapshot| {
                hits_in_listener.fetch_add(1, Ordering::SeqCst);
                if let Some(sub) = slot_in_listener.lock().unwrap().take() {
                    sub.cancel();
                }
            }),
        );
        *slot.lock().unwrap() = Some(sub);

        store.add("customers", fields(json!({}))).await.unwrap();
        store.add("customers", fields(json!({}))).await.unwrap();
        // Initial snapshot plus the first write only.
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_save_installs_nothing() {
        let store = MemoryStore::new();
        let id = store
            .add("customers", fields(json!({ "name": "Lan" })))
            .await
            .unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let last_len = Arc::new(AtomicUsize::new(0));
        let _sub = store.subscribe(
            Query::collection("customers"),
            counting_listener(&count, &last_len),
        );

        let refuse = |_: &Documents| -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::ErrorKind::Other.into()))
        };
        assert!(store.add_with("customers", fields(json!({})), refuse).is_err());
        assert!(store
            .update_with("customers", &id, fields(json!({ "name": "Mai" })), refuse)
            .is_err());
        assert!(store.delete_with("customers", &id, refuse).is_err());

        assert_eq!(store.collection_fields("customers").len(), 1);
        let doc = store.get("customers", &id).await.unwrap().unwrap();
        assert_eq!(doc.get("name"), Some(&json!("Lan")));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Nothing to remove, so nothing is saved.
        store
            .delete_with("customers", &DocumentId::from("gone"), refuse)
            .unwrap();
    }
}
