//! Ordered validation pipeline turning raw payloads into canonical holdings.
//!
//! Stages run in a fixed order and the first failure wins:
//! required fields, uniqueness, price, date, shares, then normalization.
//! The pipeline only reads from the repository.

use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use super::holdings_constants::{
    fields, CREATE_REQUIRED_FIELDS, DATE_SEPARATOR, UPDATE_REQUIRED_FIELDS,
};
use super::holdings_model::{json_kind, normalize_price, CanonicalHolding, HoldingPayload};
use super::holdings_traits::HoldingRepositoryTrait;
use crate::constants::NOT_AVAILABLE;
use crate::errors::{Error, Result, ValidationError};

/// What the payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode<'a> {
    Create,
    /// Full replacement of the holding stored under `existing_id`.
    Update { existing_id: &'a str },
}

pub struct HoldingValidator {
    repository: Arc<dyn HoldingRepositoryTrait>,
}

impl HoldingValidator {
    pub fn new(repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Validates `payload` for `mode` and returns its canonical form.
    pub fn prepare_and_validate(
        &self,
        payload: &HoldingPayload,
        mode: ValidationMode<'_>,
    ) -> Result<CanonicalHolding> {
        let required: &[&str] = match mode {
            ValidationMode::Create => &CREATE_REQUIRED_FIELDS,
            ValidationMode::Update { .. } => &UPDATE_REQUIRED_FIELDS,
        };
        if let Some(missing) = required.iter().find(|field| !payload.contains(field)) {
            return Err(ValidationError::MissingField((*missing).to_string()).into());
        }

        let symbol = required_symbol(payload)?;
        let name = optional_string(payload, fields::NAME)?;
        let purchase_date = optional_string(payload, fields::PURCHASE_DATE)?;

        match mode {
            ValidationMode::Create => self.ensure_symbol_free(&symbol)?,
            ValidationMode::Update { existing_id } => {
                let payload_id = optional_string(payload, fields::ID)?.unwrap_or_default();
                self.ensure_update_allowed(existing_id, &payload_id, &symbol)?
            }
        }

        let purchase_price = parse_purchase_price(required_field(payload, fields::PURCHASE_PRICE)?)?;

        // An empty date counts as not supplied
        if let Some(date) = purchase_date.as_deref().filter(|date| !date.is_empty()) {
            parse_purchase_date(date)?;
        }

        let shares = parse_shares(required_field(payload, fields::SHARES)?)?;

        Ok(CanonicalHolding {
            symbol,
            name: name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            purchase_price: normalize_price(purchase_price),
            purchase_date: purchase_date.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            shares,
        })
    }

    fn ensure_symbol_free(&self, symbol: &str) -> Result<()> {
        match self.repository.find_by_symbol(symbol)? {
            Some(existing) => {
                debug!("Symbol {} already held as {}", symbol, existing.id);
                Err(Error::AlreadyExists(symbol.to_string()))
            }
            None => Ok(()),
        }
    }

    fn ensure_update_allowed(&self, existing_id: &str, payload_id: &str, symbol: &str) -> Result<()> {
        let existing = self.repository.get_by_id(existing_id)?;

        if payload_id != existing_id {
            return Err(ValidationError::IdentityChange {
                existing: existing_id.to_string(),
                requested: payload_id.to_string(),
            }
            .into());
        }

        if existing.symbol == symbol {
            return Ok(());
        }

        match self.repository.find_by_symbol(symbol)? {
            Some(other) if other.id != existing.id => Err(Error::AlreadyExists(symbol.to_string())),
            _ => Ok(()),
        }
    }
}

fn required_field<'p>(payload: &'p HoldingPayload, field: &str) -> Result<&'p Value> {
    payload
        .get(field)
        .ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

fn required_symbol(payload: &HoldingPayload) -> Result<String> {
    match required_field(payload, fields::SYMBOL)? {
        Value::String(symbol) if !symbol.trim().is_empty() => Ok(symbol.to_uppercase()),
        other => Err(invalid(fields::SYMBOL, other)),
    }
}

fn optional_string(payload: &HoldingPayload, field: &str) -> Result<Option<String>> {
    match payload.get(field) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(invalid(field, other)),
    }
}

fn invalid(field: &str, value: &Value) -> Error {
    ValidationError::InvalidField {
        field: field.to_string(),
        value: match value {
            Value::String(s) => s.clone(),
            other => format!("<{}>", json_kind(other)),
        },
    }
    .into()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Parses a purchase price from a JSON number or numeric string.
pub fn parse_purchase_price(value: &Value) -> Result<Decimal> {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(fields::PURCHASE_PRICE, value))
}

/// Parses a share count: JSON integer, JSON float truncated toward zero,
/// or integer string.
pub fn parse_shares(value: &Value) -> Result<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            if n.is_f64() {
                n.as_f64()
                    .map(f64::trunc)
                    .filter(|v| v.is_finite() && *v >= i64::MIN as f64 && *v < i64::MAX as f64)
                    .map(|v| v as i64)
            } else {
                None
            }
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(fields::SHARES, value))
}

/// Checks a `DD-MM-YYYY` purchase date and returns its components.
///
/// Only ranges are checked: `31-02-2024` is accepted.
pub fn parse_purchase_date(raw: &str) -> Result<(u32, u32, i64)> {
    let bad_date = || Error::from(ValidationError::InvalidDate(raw.to_string()));

    let parts: Vec<&str> = raw.split(DATE_SEPARATOR).collect();
    if parts.len() != 3 {
        return Err(bad_date());
    }
    let mut numbers = parts.iter().map(|part| part.trim().parse::<i64>());
    let (day, month, year) = match (numbers.next(), numbers.next(), numbers.next()) {
        (Some(Ok(day)), Some(Ok(month)), Some(Ok(year))) => (day, month, year),
        _ => return Err(bad_date()),
    };

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year <= 0 {
        return Err(bad_date());
    }
    Ok((day as u32, month as u32, year))
}
