//! Database model for stored documents.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value;
use stockfolio_core::documents::{Document, DOCUMENT_ID_KEY};
use stockfolio_core::errors::{DatabaseError, Error, Result};

/// One document of a collection; `body` holds its JSON object text.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentDB {
    pub id: String,
    pub collection: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl DocumentDB {
    /// Decoded body, without the store key.
    pub fn fields(&self) -> Result<Document> {
        match serde_json::from_str::<Value>(&self.body)? {
            Value::Object(fields) => Ok(fields),
            _ => Err(Error::Database(DatabaseError::Serialization(format!(
                "document {} is not a JSON object",
                self.id
            )))),
        }
    }

    /// Decoded body with the store key exposed under `_id`.
    pub fn into_document(self) -> Result<Document> {
        let mut document = self.fields()?;
        document.insert(DOCUMENT_ID_KEY.to_string(), Value::String(self.id));
        Ok(document)
    }
}
