//! Holding domain models.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::holdings_constants::fields;
use super::holdings_validator::{parse_purchase_price, parse_shares};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, NOT_AVAILABLE};
use crate::documents::{Document, DocumentFilter, DOCUMENT_ID_KEY};
use crate::errors::{Error, Result};

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// A stored stock holding, as read back from a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    #[serde(default)]
    pub id: String,
    pub symbol: String,
    #[serde(default = "not_available")]
    pub name: String,
    #[serde(rename = "purchase price")]
    pub purchase_price: Decimal,
    #[serde(rename = "purchase date", default = "not_available")]
    pub purchase_date: String,
    pub shares: i64,
}

/// A validated, normalized holding ready to be written.
///
/// Carries no identity: the store assigns it on insert and it never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalHolding {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "purchase price")]
    pub purchase_price: Decimal,
    #[serde(rename = "purchase date")]
    pub purchase_date: String,
    pub shares: i64,
}

impl CanonicalHolding {
    /// Document body persisted for this record.
    pub fn to_document(&self) -> Result<Document> {
        match serde_json::to_value(self)? {
            Value::Object(document) => Ok(document),
            other => Err(Error::Unexpected(format!(
                "holding encoded as a non-object: {}",
                other
            ))),
        }
    }
}

/// Raw, untrusted holding payload as received from a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingPayload(Document);

impl HoldingPayload {
    /// Accepts any JSON object; anything else is malformed.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(Error::malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl From<Document> for HoldingPayload {
    fn from(fields: Document) -> Self {
        Self(fields)
    }
}

/// Field-equality filter over holdings, keyed by wire field names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingFilter {
    conditions: Document,
}

impl HoldingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    /// Builds a filter from URL query pairs.
    ///
    /// `purchase price` is parsed and rounded the way stored prices are,
    /// `shares` is coerced to an integer; every other value is matched as a
    /// string. Unparseable numeric values are malformed.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::new();
        for (key, raw) in pairs {
            let key = key.as_ref();
            let raw = Value::String(raw.as_ref().to_string());
            let value = match key {
                fields::PURCHASE_PRICE => {
                    serde_json::to_value(normalize_price(parse_purchase_price(&raw)?))?
                }
                fields::SHARES => Value::from(parse_shares(&raw)?),
                _ => raw,
            };
            filter = filter.with(key, value);
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Store-level filter, with `id` translated to the store's key.
    pub fn to_document_filter(&self) -> DocumentFilter {
        self.conditions
            .iter()
            .fold(DocumentFilter::new(), |filter, (field, value)| {
                let field = if field == fields::ID {
                    DOCUMENT_ID_KEY
                } else {
                    field.as_str()
                };
                filter.with(field, value.clone())
            })
    }
}

/// Rounds a price to the stored precision, halves away from zero.
pub fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
