//! In-memory document store used by unit tests.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use bson::Document;
use parking_lot::Mutex;

use super::store::{CollectionHandle, DocumentStore, StoreError};

/// Map-backed store with per-document failure injection and call counters.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    create_delay: Mutex<Option<Duration>>,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<String, Document>,
    entries: HashMap<(String, String), Vec<Document>>,
    failing: HashSet<String>,
    create_calls: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation against the given document id fail.
    pub fn fail_document(&self, id: &str) {
        self.inner.lock().failing.insert(id.to_string());
    }

    /// Delay document creation, to widen the bootstrap race window.
    pub fn delay_creates(&self, delay: Duration) {
        *self.create_delay.lock() = Some(delay);
    }

    /// Seed a document without going through the bootstrap path.
    pub fn seed_document(&self, id: &str, data: Document) {
        self.inner.lock().documents.insert(id.to_string(), data);
    }

    pub fn create_calls(&self) -> usize {
        self.inner.lock().create_calls
    }

    pub fn document(&self, id: &str) -> Option<Document> {
        self.inner.lock().documents.get(id).cloned()
    }

    pub fn entry_count(&self, collection: &CollectionHandle) -> usize {
        self.inner
            .lock()
            .entries
            .get(&(collection.document_id.clone(), collection.name.clone()))
            .map_or(0, Vec::len)
    }

    fn check(&self, id: &str) -> Result<(), StoreError> {
        if self.inner.lock().failing.contains(id) {
            return Err(StoreError::Other(format!("injected failure for {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.check(id)?;
        Ok(self.inner.lock().documents.get(id).cloned())
    }

    async fn create_document(&self, id: &str, data: Document) -> Result<(), StoreError> {
        self.check(id)?;
        let delay = *self.create_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.inner.lock();
        inner.create_calls += 1;
        inner.documents.insert(id.to_string(), data);
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<(), StoreError> {
        self.check(id)?;
        self.inner.lock().documents.remove(id);
        Ok(())
    }

    async fn add_entry(
        &self,
        collection: &CollectionHandle,
        data: Document,
    ) -> Result<(), StoreError> {
        self.check(&collection.document_id)?;
        self.inner
            .lock()
            .entries
            .entry((collection.document_id.clone(), collection.name.clone()))
            .or_default()
            .push(data);
        Ok(())
    }

    async fn has_entries(&self, collection: &CollectionHandle) -> Result<bool, StoreError> {
        self.check(&collection.document_id)?;
        Ok(self.entry_count(collection) > 0)
    }
}
