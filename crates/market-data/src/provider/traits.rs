//! Price provider trait definition.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;

/// Trait for live price providers.
///
/// Implement this trait to add support for a new price source. A provider
/// answers one symbol at a time; batching and concurrency are the caller's
/// concern.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use rust_decimal::Decimal;
/// use stockfolio_market_data::{MarketDataError, PriceProvider};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl PriceProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_price(&self, _symbol: &str) -> Result<Decimal, MarketDataError> {
///         Ok(Decimal::ONE_HUNDRED)
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the current price for a ticker symbol.
    ///
    /// The symbol is passed through as-is; callers normalize it.
    async fn get_latest_price(&self, symbol: &str) -> Result<Decimal, MarketDataError>;
}
