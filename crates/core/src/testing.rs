//! Hand-written doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use stockfolio_market_data::{MarketDataError, PriceProvider};

use crate::documents::{
    Document, DocumentFilter, DocumentId, DocumentStoreTrait, DOCUMENT_ID_KEY,
};
use crate::errors::{DatabaseError, Error, Result};

// --- In-memory document store ---
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Vec<(DocumentId, Document)>>>>,
    fail: Arc<Mutex<bool>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a database error.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check(&self) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "store offline".to_string(),
            )));
        }
        Ok(())
    }

    fn with_id(id: &DocumentId, document: &Document) -> Document {
        let mut document = document.clone();
        document.insert(DOCUMENT_ID_KEY.to_string(), Value::String(id.to_string()));
        document
    }
}

#[async_trait]
impl DocumentStoreTrait for InMemoryDocumentStore {
    fn find(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Document>> {
        self.check()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .into_iter()
            .flatten()
            .map(|(id, document)| Self::with_id(id, document))
            .filter(|document| filter.matches(document))
            .collect())
    }

    fn find_one(&self, collection: &str, filter: &DocumentFilter) -> Result<Option<Document>> {
        Ok(self.find(collection, filter)?.into_iter().next())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<DocumentId> {
        self.check()?;
        document.remove(DOCUMENT_ID_KEY);
        let id = DocumentId::generate();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push((id, document));
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Document,
    ) -> Result<u64> {
        self.check()?;
        let mut collections = self.collections.lock().unwrap();
        let entry = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id));
        match entry {
            Some((_, document)) => {
                for (key, value) in patch {
                    if key != DOCUMENT_ID_KEY {
                        document.insert(key, value);
                    }
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, id: &DocumentId) -> Result<u64> {
        self.check()?;
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|(doc_id, _)| doc_id != id);
        Ok((before - docs.len()) as u64)
    }
}

// --- Mock price provider ---
#[derive(Clone, Default)]
pub struct MockPriceProvider {
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
    failing: Arc<Mutex<HashMap<String, u16>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.prices.lock().unwrap().insert(symbol.to_string(), price);
        self
    }

    /// Lookups of `symbol` answer with HTTP `status`.
    pub fn with_failure(self, symbol: &str, status: u16) -> Self {
        self.failing
            .lock()
            .unwrap()
            .insert(symbol.to_string(), status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_latest_price(&self, symbol: &str) -> std::result::Result<Decimal, MarketDataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        if let Some(status) = self.failing.lock().unwrap().get(symbol) {
            return Err(MarketDataError::HttpStatus {
                provider: "MOCK".to_string(),
                status: *status,
            });
        }
        self.prices
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}
