use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use stockfolio_core::documents::{
    Document, DocumentFilter, DocumentId, DocumentStoreTrait, DOCUMENT_ID_KEY,
};
use stockfolio_core::Result;

use super::model::DocumentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::documents;

/// Document store over the `documents` table.
///
/// Reads use the pool; every write goes through the single writer.
/// Field filters are evaluated on the decoded bodies, narrowed by id in
/// SQL when the filter names one.
pub struct SqliteDocumentStore {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteDocumentStore {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SqliteDocumentStore { pool, writer }
    }

    fn load_rows(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<DocumentDB>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = documents::table
            .filter(documents::collection.eq(collection))
            .into_boxed();
        if let Some(id) = filter.id() {
            query = query.filter(documents::id.eq(id.to_string()));
        }
        query
            .order((documents::created_at.asc(), documents::id.asc()))
            .select(DocumentDB::as_select())
            .load::<DocumentDB>(&mut conn)
            .into_core()
    }
}

#[async_trait]
impl DocumentStoreTrait for SqliteDocumentStore {
    fn find(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Document>> {
        let mut matching = Vec::new();
        for row in self.load_rows(collection, filter)? {
            let document = row.into_document()?;
            if filter.matches(&document) {
                matching.push(document);
            }
        }
        Ok(matching)
    }

    fn find_one(&self, collection: &str, filter: &DocumentFilter) -> Result<Option<Document>> {
        for row in self.load_rows(collection, filter)? {
            let document = row.into_document()?;
            if filter.matches(&document) {
                return Ok(Some(document));
            }
        }
        Ok(None)
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<DocumentId> {
        document.remove(DOCUMENT_ID_KEY);
        let id = DocumentId::generate();
        let now = Utc::now().naive_utc();
        let row = DocumentDB {
            id: id.to_string(),
            collection: collection.to_string(),
            body: serde_json::to_string(&document)?,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(documents::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;

        debug!("Inserted document {} into {}", id, collection);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Document,
    ) -> Result<u64> {
        let collection = collection.to_string();
        let id = id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<u64> {
                let existing = documents::table
                    .filter(documents::collection.eq(&collection))
                    .filter(documents::id.eq(&id))
                    .select(DocumentDB::as_select())
                    .first::<DocumentDB>(conn)
                    .optional()
                    .into_core()?;

                let Some(existing) = existing else {
                    return Ok(0);
                };

                let mut body = existing.fields()?;
                for (field, value) in patch {
                    if field != DOCUMENT_ID_KEY {
                        body.insert(field, value);
                    }
                }

                diesel::update(documents::table.find(&id))
                    .set((
                        documents::body.eq(serde_json::to_string(&body)?),
                        documents::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(1)
            })
            .await
    }

    async fn delete_one(&self, collection: &str, id: &DocumentId) -> Result<u64> {
        let collection = collection.to_string();
        let id = id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<u64> {
                let deleted = diesel::delete(
                    documents::table
                        .filter(documents::collection.eq(&collection))
                        .filter(documents::id.eq(&id)),
                )
                .execute(conn)
                .into_core()?;
                Ok(deleted as u64)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteDocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("test.db");
        let db_path = init(db_path.to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer(pool.as_ref().clone());
        (dir, SqliteDocumentStore::new(pool, writer))
    }

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (_dir, store) = setup();
        let id = store
            .insert_one("stocks1", doc(json!({"symbol": "AAPL", "shares": 10})))
            .await
            .unwrap();

        let found = store
            .find_one("stocks1", &DocumentFilter::by_id(&id))
            .unwrap()
            .unwrap();
        assert_eq!(found["_id"], json!(id.to_string()));
        assert_eq!(found["symbol"], json!("AAPL"));
        assert_eq!(found["shares"], json!(10));
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let (_dir, store) = setup();
        store
            .insert_one("stocks1", doc(json!({"symbol": "AAPL"})))
            .await
            .unwrap();
        store
            .insert_one("stocks2", doc(json!({"symbol": "MSFT"})))
            .await
            .unwrap();

        let first = store.find("stocks1", &DocumentFilter::new()).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0]["symbol"], json!("AAPL"));
        assert!(store.find("stocks3", &DocumentFilter::new()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_field_filters() {
        let (_dir, store) = setup();
        for (symbol, shares) in [("AAPL", 10), ("MSFT", 5), ("GOOG", 10)] {
            store
                .insert_one("stocks1", doc(json!({"symbol": symbol, "shares": shares})))
                .await
                .unwrap();
        }

        let ten = DocumentFilter::new().with("shares", 10);
        assert_eq!(store.find("stocks1", &ten).unwrap().len(), 2);

        let msft = DocumentFilter::new().with("symbol", "MSFT");
        let found = store.find_one("stocks1", &msft).unwrap().unwrap();
        assert_eq!(found["shares"], json!(5));

        let none = DocumentFilter::new().with("symbol", "TSLA");
        assert!(store.find_one("stocks1", &none).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (_dir, store) = setup();
        let id = store
            .insert_one("stocks1", doc(json!({"symbol": "AAPL", "name": "NA", "shares": 1})))
            .await
            .unwrap();

        let matched = store
            .update_one("stocks1", &id, doc(json!({"name": "Apple", "_id": "ignored"})))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let found = store
            .find_one("stocks1", &DocumentFilter::by_id(&id))
            .unwrap()
            .unwrap();
        assert_eq!(found["name"], json!("Apple"));
        assert_eq!(found["shares"], json!(1));
        assert_eq!(found["_id"], json!(id.to_string()));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_document() {
        let (_dir, store) = setup();
        let id = DocumentId::generate();
        assert_eq!(
            store.update_one("stocks1", &id, Document::new()).await.unwrap(),
            0
        );
        assert_eq!(store.delete_one("stocks1", &id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_collection() {
        let (_dir, store) = setup();
        let id = store
            .insert_one("stocks1", doc(json!({"symbol": "AAPL"})))
            .await
            .unwrap();

        assert_eq!(store.delete_one("stocks2", &id).await.unwrap(), 0);
        assert_eq!(store.delete_one("stocks1", &id).await.unwrap(), 1);
        assert!(store
            .find_one("stocks1", &DocumentFilter::by_id(&id))
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_float_values_survive_storage() {
        let (_dir, store) = setup();
        store
            .insert_one("stocks1", doc(json!({"purchase price": 12.35})))
            .await
            .unwrap();
        let filter = DocumentFilter::new().with("purchase price", 12.35);
        assert_eq!(store.find("stocks1", &filter).unwrap().len(), 1);
    }
}
