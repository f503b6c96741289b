//! API Ninjas stock price provider implementation.
//!
//! Single endpoint: `GET /v1/stockprice?ticker=<symbol>` authenticated with
//! the `X-Api-Key` header. A known ticker answers with an object carrying a
//! numeric `price`; an unknown ticker answers 200 with an empty body (`[]`
//! or `{}`).
//!
//! API documentation: https://api-ninjas.com/api/stockprice

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::provider::PriceProvider;

/// Default price endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.api-ninjas.com/v1/stockprice";

/// Default request timeout for price lookups.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_ID: &str = "API_NINJAS";
const API_KEY_HEADER: &str = "X-Api-Key";

/// API Ninjas live price provider.
pub struct ApiNinjasProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiNinjasProvider {
    /// Create a provider against the public endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(DEFAULT_BASE_URL.to_string(), api_key, DEFAULT_TIMEOUT)
    }

    /// Create a provider against a custom endpoint with a custom timeout.
    pub fn with_endpoint(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Endpoint this provider queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, symbol: &str) -> Result<String, MarketDataError> {
        debug!("API Ninjas request for ticker {}", symbol);

        let response = self
            .client
            .get(&self.base_url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("ticker", symbol)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("API Ninjas answered HTTP {} for {}", status, symbol);
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

/// Extract the `price` field from a successful response body.
fn parse_price(symbol: &str, body: &str) -> Result<Decimal, MarketDataError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse price response: {}", e),
        })?;

    let price = match &value {
        Value::Object(map) => map.get("price"),
        Value::Array(items) => items.first().and_then(|item| item.get("price")),
        _ => None,
    };

    match price {
        Some(Value::Number(n)) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|_| MarketDataError::MalformedResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Invalid price: {}", raw),
                })
        }
        Some(other) => Err(MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("Non-numeric price: {}", other),
        }),
        None => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
    }
}

#[async_trait]
impl PriceProvider for ApiNinjasProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<Decimal, MarketDataError> {
        let body = self.fetch(symbol).await?;
        parse_price(symbol, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = ApiNinjasProvider::new("test_key".to_string());
        assert_eq!(provider.id(), "API_NINJAS");
        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_custom_endpoint() {
        let provider = ApiNinjasProvider::with_endpoint(
            "http://localhost:9999/price".to_string(),
            "k".to_string(),
            Duration::from_millis(50),
        );
        assert_eq!(provider.base_url(), "http://localhost:9999/price");
    }

    #[test]
    fn test_parse_price_object() {
        let body = r#"{"ticker":"AAPL","name":"Apple Inc.","price":192.42,"exchange":"NASDAQ","updated":1706302801,"currency":"USD"}"#;
        assert_eq!(parse_price("AAPL", body).unwrap(), dec!(192.42));
    }

    #[test]
    fn test_parse_price_integer() {
        assert_eq!(parse_price("X", r#"{"price":120}"#).unwrap(), dec!(120));
    }

    #[test]
    fn test_parse_price_first_array_item() {
        let body = r#"[{"ticker":"MSFT","price":401.5}]"#;
        assert_eq!(parse_price("MSFT", body).unwrap(), dec!(401.5));
    }

    #[test]
    fn test_parse_price_unknown_symbol() {
        for body in ["[]", "{}"] {
            let err = parse_price("NOPE", body).unwrap_err();
            assert!(matches!(err, MarketDataError::SymbolNotFound(ref s) if s == "NOPE"));
        }
    }

    #[test]
    fn test_parse_price_non_numeric() {
        let err = parse_price("AAPL", r#"{"price":"abc"}"#).unwrap_err();
        assert!(matches!(err, MarketDataError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_price_invalid_json() {
        let err = parse_price("AAPL", "<html>").unwrap_err();
        assert!(matches!(err, MarketDataError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let provider = ApiNinjasProvider::with_endpoint(
            "http://127.0.0.1:1/price".to_string(),
            "k".to_string(),
            Duration::from_millis(500),
        );
        let err = provider.get_latest_price("AAPL").await.unwrap_err();
        assert!(matches!(
            err,
            MarketDataError::Network(_) | MarketDataError::Timeout { .. }
        ));
    }
}
