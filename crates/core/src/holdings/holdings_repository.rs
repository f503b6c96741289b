use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::holdings_constants::fields;
use super::holdings_model::{CanonicalHolding, Holding, HoldingFilter};
use super::holdings_traits::HoldingRepositoryTrait;
use crate::documents::{Document, DocumentFilter, DocumentId, DocumentStoreTrait, DOCUMENT_ID_KEY};
use crate::errors::{Error, Result};

/// Holding repository over one collection of a document store.
pub struct HoldingRepository {
    store: Arc<dyn DocumentStoreTrait>,
    collection: String,
}

impl HoldingRepository {
    pub fn new(store: Arc<dyn DocumentStoreTrait>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    fn decode(mut document: Document) -> Result<Holding> {
        if let Some(id) = document.remove(DOCUMENT_ID_KEY) {
            document.insert(fields::ID.to_string(), id);
        }
        Ok(serde_json::from_value(Value::Object(document))?)
    }

    fn not_found(holding_id: &str) -> Error {
        Error::NotFound(format!("Holding {}", holding_id))
    }

    fn find_one(&self, filter: &DocumentFilter) -> Result<Option<Holding>> {
        self.store
            .find_one(&self.collection, filter)?
            .map(Self::decode)
            .transpose()
    }

    /// Resolves `holding_id` to a stored document id, or `NotFound`.
    fn existing_id(&self, holding_id: &str) -> Result<DocumentId> {
        let id = DocumentId::parse(holding_id).ok_or_else(|| Self::not_found(holding_id))?;
        match self.find_one(&DocumentFilter::by_id(&id))? {
            Some(_) => Ok(id),
            None => Err(Self::not_found(holding_id)),
        }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn list(&self, filter: &HoldingFilter) -> Result<Vec<Holding>> {
        self.store
            .find(&self.collection, &filter.to_document_filter())?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    fn get_by_id(&self, holding_id: &str) -> Result<Holding> {
        let id = DocumentId::parse(holding_id).ok_or_else(|| Self::not_found(holding_id))?;
        self.find_one(&DocumentFilter::by_id(&id))?
            .ok_or_else(|| Self::not_found(holding_id))
    }

    fn find_by_symbol(&self, symbol: &str) -> Result<Option<Holding>> {
        self.find_one(&DocumentFilter::new().with(fields::SYMBOL, symbol))
    }

    fn get_by_symbol(&self, symbol: &str) -> Result<Holding> {
        self.find_by_symbol(symbol)?
            .ok_or_else(|| Error::NotFound(format!("Holding with symbol {}", symbol)))
    }

    async fn create(&self, record: CanonicalHolding) -> Result<String> {
        let id = self
            .store
            .insert_one(&self.collection, record.to_document()?)
            .await?;
        debug!("Created holding {} ({}) in {}", id, record.symbol, self.collection);
        Ok(id.to_string())
    }

    async fn update(&self, holding_id: &str, record: CanonicalHolding) -> Result<bool> {
        let id = self.existing_id(holding_id)?;
        let matched = self
            .store
            .update_one(&self.collection, &id, record.to_document()?)
            .await?;
        Ok(matched > 0)
    }

    async fn delete(&self, holding_id: &str) -> Result<bool> {
        let id = self.existing_id(holding_id)?;
        let deleted = self.store.delete_one(&self.collection, &id).await?;
        debug!("Deleted holding {} from {}", holding_id, self.collection);
        Ok(deleted > 0)
    }
}
