//! Documents module - the schemaless store contract used by repositories.

mod documents_model;
mod documents_traits;

// Re-export the public interface
pub use documents_model::{Document, DocumentFilter, DocumentId, DOCUMENT_ID_KEY};
pub use documents_traits::DocumentStoreTrait;
