//! Document store domain models.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Key under which a store exposes a document's identifier.
pub const DOCUMENT_ID_KEY: &str = "_id";

/// A schemaless document: a JSON object.
pub type Document = Map<String, Value>;

/// Native identifier assigned by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        DocumentId(Uuid::new_v4())
    }

    /// Parses an identifier previously rendered with `to_string`.
    ///
    /// Only the rendered form is accepted: other spellings of the same
    /// UUID (uppercase, braced, simple) are not identifiers of this store.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw)
            .ok()
            .filter(|id| id.hyphenated().to_string() == raw)
            .map(DocumentId)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field-equality filter over documents.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    fields: Document,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching the document with the given identifier.
    pub fn by_id(id: &DocumentId) -> Self {
        Self::new().with(DOCUMENT_ID_KEY, Value::String(id.to_string()))
    }

    /// Adds (or replaces) an equality condition on `field`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Identifier condition, when the filter has one.
    pub fn id(&self) -> Option<DocumentId> {
        self.fields
            .get(DOCUMENT_ID_KEY)
            .and_then(Value::as_str)
            .and_then(DocumentId::parse)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Whether every condition holds on `document`.
    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_document_id_round_trips_through_display() {
        let id = DocumentId::generate();
        assert_eq!(DocumentId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn test_document_id_rejects_garbage() {
        assert_eq!(DocumentId::parse("not-an-id"), None);
        assert_eq!(DocumentId::parse(""), None);
    }

    #[test]
    fn test_document_id_only_accepts_rendered_form() {
        let id = DocumentId::generate();
        let rendered = id.to_string();
        assert_eq!(DocumentId::parse(&rendered.to_uppercase()), None);
        assert_eq!(DocumentId::parse(&format!("{{{}}}", rendered)), None);
        assert_eq!(DocumentId::parse(&rendered.replace('-', "")), None);
        assert_eq!(DocumentId::parse(&format!(" {}", rendered)), None);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = DocumentFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&doc(json!({"symbol": "AAPL"}))));
        assert!(filter.matches(&Document::new()));
    }

    #[test]
    fn test_filter_requires_all_fields() {
        let filter = DocumentFilter::new().with("symbol", "AAPL").with("shares", 10);
        assert!(filter.matches(&doc(json!({"symbol": "AAPL", "shares": 10, "name": "x"}))));
        assert!(!filter.matches(&doc(json!({"symbol": "AAPL", "shares": 11}))));
        assert!(!filter.matches(&doc(json!({"symbol": "AAPL"}))));
    }

    #[test]
    fn test_filter_by_id() {
        let id = DocumentId::generate();
        let filter = DocumentFilter::by_id(&id);
        assert_eq!(filter.id(), Some(id));
        assert!(filter.matches(&doc(json!({ "_id": id.to_string() }))));
    }
}
