//! Document store abstraction.
//!
//! The remote store is modelled as a hierarchical document database:
//! top-level guild documents keyed by guild id, each carrying named
//! sub-collections of entry documents. The rest of the crate only talks
//! to [`DocumentStore`], which keeps the cache layer testable against an
//! in-memory backend.

use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

/// Errors surfaced by a document store backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("document store backend error: {0}")]
    Backend(#[from] mongodb::error::Error),

    #[error("could not encode record: {0}")]
    Encode(String),

    /// Backend-agnostic failure, for non-MongoDB backends.
    #[allow(dead_code)]
    #[error("{0}")]
    Other(String),
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Handle to a named sub-collection under one guild document.
///
/// Purely descriptive; resolving it against actual storage is the
/// backend's job. Constructing one performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    /// Id of the guild document this sub-collection belongs to.
    pub document_id: String,
    /// Sub-collection name, e.g. `players`.
    pub name: String,
}

impl CollectionHandle {
    pub fn new(document_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            name: name.into(),
        }
    }
}

/// Asynchronous document store API.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a guild document by id. Returns `Ok(None)` when absent.
    async fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create a guild document with the given initial data.
    async fn create_document(&self, id: &str, data: Document) -> Result<(), StoreError>;

    /// Delete a guild document. Deleting an absent document is not an error.
    async fn delete_document(&self, id: &str) -> Result<(), StoreError>;

    /// Handle to a named sub-collection of a guild document.
    fn subcollection(&self, id: &str, name: &str) -> CollectionHandle {
        CollectionHandle::new(id, name)
    }

    /// Insert an entry document into a sub-collection.
    async fn add_entry(
        &self,
        collection: &CollectionHandle,
        data: Document,
    ) -> Result<(), StoreError>;

    /// Whether the sub-collection holds at least one entry.
    async fn has_entries(&self, collection: &CollectionHandle) -> Result<bool, StoreError>;
}
