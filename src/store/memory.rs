//! In-process [`DocumentStore`] backed by a lock-guarded map.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::error::CollaboratorError;
use crate::models::TenantId;

use super::document_store::DocumentStore;
use super::record::{Document, Filter, Record, from_document, matches_all, to_document};
use super::snapshot::Snapshot;

type CollectionKey = (TenantId, &'static str);

#[derive(Debug)]
struct Collection {
    documents: BTreeMap<String, Document>,
    feed: watch::Sender<Arc<Vec<Document>>>,
}

impl Collection {
    fn new() -> Self {
        let (feed, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            documents: BTreeMap::new(),
            feed,
        }
    }

    fn publish(&self) {
        self.feed
            .send_replace(Arc::new(self.documents.values().cloned().collect()));
    }

    fn find<R: Record>(&self, filters: &[Filter]) -> Result<Vec<R>, CollaboratorError> {
        self.documents
            .values()
            .filter(|document| matches_all(filters, document))
            .map(from_document::<R>)
            .collect()
    }

    fn insert<R: Record>(&mut self, mut record: R) -> Result<R, CollaboratorError> {
        let id = Uuid::new_v4().to_string();
        record.set_id(id.clone());
        let document = to_document(&record)?;
        self.documents.insert(id, document);
        self.publish();
        Ok(record)
    }

    fn merge<R: Record>(&mut self, id: &str, changes: Document) -> Result<R, CollaboratorError> {
        let mut merged = self
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| not_found::<R>(id))?;
        for (field, value) in changes {
            if field != "id" {
                merged.insert(field, value);
            }
        }

        // Decode before committing so a bad change never reaches readers.
        let record = from_document::<R>(&merged)?;
        self.documents.insert(id.to_string(), merged);
        self.publish();
        Ok(record)
    }
}

/// A tenant-partitioned, in-memory document store.
///
/// All collections share one `RwLock`; reads run concurrently and each write
/// (including the check in `create_unless` and `update_if`) holds the write
/// lock for its whole duration. Every write publishes the collection's full
/// contents to its subscribers.
///
/// # Example
///
/// ```
/// use barbershop_engine::models::{Barber, TenantId};
/// use barbershop_engine::store::{DocumentStore, Filter, MemoryStore};
///
/// let store = MemoryStore::new();
/// let tenant = TenantId::new("demo");
/// let barber = store
///     .create(&tenant, Barber { id: String::new(), name: "Carlos".into(), active: true })
///     .unwrap();
///
/// let found: Vec<Barber> = store.find(&tenant, &[Filter::eq("active", true)]).unwrap();
/// assert_eq!(found, vec![barber]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionKey, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R: Record, T>(
        &self,
        tenant: &TenantId,
        f: impl FnOnce(Option<&Collection>) -> T,
    ) -> T {
        let collections = self.collections.read();
        f(collections.get(&(tenant.clone(), R::COLLECTION)))
    }

    fn write<R: Record, T>(&self, tenant: &TenantId, f: impl FnOnce(&mut Collection) -> T) -> T {
        let mut collections = self.collections.write();
        let collection = collections
            .entry((tenant.clone(), R::COLLECTION))
            .or_insert_with(Collection::new);
        f(collection)
    }
}

impl DocumentStore for MemoryStore {
    fn find<R: Record>(
        &self,
        tenant: &TenantId,
        filters: &[Filter],
    ) -> Result<Vec<R>, CollaboratorError> {
        self.read::<R, _>(tenant, |collection| match collection {
            Some(collection) => collection.find(filters),
            None => Ok(Vec::new()),
        })
    }

    fn get<R: Record>(&self, tenant: &TenantId, id: &str) -> Result<R, CollaboratorError> {
        self.read::<R, _>(tenant, |collection| {
            collection
                .and_then(|c| c.documents.get(id))
                .ok_or_else(|| not_found::<R>(id))
                .and_then(from_document::<R>)
        })
    }

    fn create<R: Record>(&self, tenant: &TenantId, record: R) -> Result<R, CollaboratorError> {
        let record = self.write::<R, _>(tenant, |collection| collection.insert(record))?;
        debug!(tenant = %tenant, collection = R::COLLECTION, id = record.id(), "Created record");
        Ok(record)
    }

    fn create_unless<R: Record>(
        &self,
        tenant: &TenantId,
        record: R,
        conflicts: &[Filter],
    ) -> Result<Option<R>, CollaboratorError> {
        self.write::<R, _>(tenant, |collection| {
            let taken = collection
                .documents
                .values()
                .any(|document| matches_all(conflicts, document));
            if taken {
                debug!(tenant = %tenant, collection = R::COLLECTION, "Conditional create refused");
                Ok(None)
            } else {
                collection.insert(record).map(Some)
            }
        })
    }

    fn update<R: Record>(
        &self,
        tenant: &TenantId,
        id: &str,
        changes: Document,
    ) -> Result<R, CollaboratorError> {
        self.write::<R, _>(tenant, |collection| collection.merge(id, changes))
    }

    fn update_if<R: Record>(
        &self,
        tenant: &TenantId,
        id: &str,
        expected: &[Filter],
        changes: Document,
    ) -> Result<Option<R>, CollaboratorError> {
        self.write::<R, _>(tenant, |collection| {
            let current = collection
                .documents
                .get(id)
                .ok_or_else(|| not_found::<R>(id))?;
            if !matches_all(expected, current) {
                return Ok(None);
            }
            collection.merge(id, changes).map(Some)
        })
    }

    fn delete<R: Record>(&self, tenant: &TenantId, id: &str) -> Result<(), CollaboratorError> {
        self.write::<R, _>(tenant, |collection| {
            collection
                .documents
                .remove(id)
                .ok_or_else(|| not_found::<R>(id))?;
            collection.publish();
            Ok(())
        })?;
        debug!(tenant = %tenant, collection = R::COLLECTION, id, "Deleted record");
        Ok(())
    }

    fn subscribe<R: Record>(&self, tenant: &TenantId) -> Result<Snapshot<R>, CollaboratorError> {
        let feed = self.write::<R, _>(tenant, |collection| collection.feed.subscribe());
        Snapshot::new(feed)
    }
}

fn not_found<R: Record>(id: &str) -> CollaboratorError {
    CollaboratorError::NotFound {
        collection: R::COLLECTION.to_string(),
        id: id.to_string(),
    }
}
