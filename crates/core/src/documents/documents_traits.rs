//! Document store trait.
//!
//! This trait defines the contract for a named-collection document store
//! without any storage-specific types, allowing different implementations.

use async_trait::async_trait;

use super::documents_model::{Document, DocumentFilter, DocumentId};
use crate::errors::Result;

/// Trait defining the contract for document store operations.
///
/// Documents returned by `find`/`find_one` carry their identifier under
/// `_id`. Every storage fault is reported as `Error::Database`; absence is
/// never an error at this level.
#[async_trait]
pub trait DocumentStoreTrait: Send + Sync {
    /// Lists the documents of `collection` matching `filter`.
    fn find(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Document>>;

    /// Returns the first document of `collection` matching `filter`.
    fn find_one(&self, collection: &str, filter: &DocumentFilter) -> Result<Option<Document>>;

    /// Inserts a document and returns the identifier assigned to it.
    ///
    /// Any `_id` key in `document` is ignored.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<DocumentId>;

    /// Overwrites the fields of `patch` on the document `id`, keeping the others.
    ///
    /// Returns the number of matched documents (0 or 1).
    async fn update_one(&self, collection: &str, id: &DocumentId, patch: Document)
        -> Result<u64>;

    /// Deletes the document `id`.
    ///
    /// Returns the number of deleted documents (0 or 1).
    async fn delete_one(&self, collection: &str, id: &DocumentId) -> Result<u64>;
}
