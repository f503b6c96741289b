use crate::constants::{DEFAULT_QUOTE_CONCURRENCY, DEFAULT_VALUATION_DATE};
use crate::errors::{Error, Result};
use crate::holdings::{normalize_price, Holding};
use crate::portfolio::valuation::valuation_model::{HoldingValue, PortfolioValue, SharesRange};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use stockfolio_market_data::PriceProvider;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Values every holding at its current price.
    ///
    /// Returns Σ price × shares rounded to two decimals, labelled with
    /// `date` (or "Today"). A single price failure fails the whole valuation.
    async fn value_portfolio(
        &self,
        holdings: &[Holding],
        date: Option<String>,
    ) -> Result<PortfolioValue>;

    /// Values one holding: its current price and price × shares rounded to
    /// two decimals.
    async fn value_holding(&self, holding: &Holding) -> Result<HoldingValue>;

    /// Sums (current price − purchase price) × shares over the holdings
    /// whose share count lies in `range`. Unrounded; fails on the first
    /// price failure.
    async fn compute_capital_gains(
        &self,
        holdings: &[Holding],
        range: &SharesRange,
    ) -> Result<Decimal>;
}

#[derive(Clone)]
pub struct ValuationService {
    price_provider: Arc<dyn PriceProvider>,
    max_concurrency: usize,
}

impl ValuationService {
    pub fn new(price_provider: Arc<dyn PriceProvider>) -> Self {
        Self::with_concurrency(price_provider, DEFAULT_QUOTE_CONCURRENCY)
    }

    pub fn with_concurrency(price_provider: Arc<dyn PriceProvider>, max_concurrency: usize) -> Self {
        Self {
            price_provider,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Prices each symbol, at most `max_concurrency` lookups in flight.
    /// Output order follows input order; the first failure ends the run.
    async fn latest_prices(&self, symbols: Vec<String>) -> Result<Vec<Decimal>> {
        let provider = self.price_provider.clone();
        stream::iter(symbols)
            .map(move |symbol| latest_price(provider.clone(), symbol))
            .buffered(self.max_concurrency)
            .boxed()
            .try_collect()
            .await
    }
}

async fn latest_price(provider: Arc<dyn PriceProvider>, symbol: String) -> Result<Decimal> {
    match provider.get_latest_price(&symbol).await {
        Ok(price) => Ok(price),
        Err(source) => {
            warn!(
                "Price lookup for {} via {} failed: {}",
                symbol,
                provider.id(),
                source
            );
            Err(Error::MarketData { symbol, source })
        }
    }
}

fn overflow(what: &str, symbol: &str) -> Error {
    Error::Overflow(format!("{} of {}", what, symbol))
}

/// `price × shares`, or an overflow error.
fn market_value(symbol: &str, price: Decimal, shares: i64) -> Result<Decimal> {
    price
        .checked_mul(Decimal::from(shares))
        .ok_or_else(|| overflow("market value", symbol))
}

/// `(price − purchase price) × shares`, or an overflow error.
fn capital_gain(holding: &Holding, price: Decimal) -> Result<Decimal> {
    price
        .checked_sub(holding.purchase_price)
        .and_then(|gain| gain.checked_mul(Decimal::from(holding.shares)))
        .ok_or_else(|| overflow("capital gain", &holding.symbol))
}

fn symbols(holdings: &[&Holding]) -> Vec<String> {
    holdings.iter().map(|holding| holding.symbol.clone()).collect()
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn value_portfolio(
        &self,
        holdings: &[Holding],
        date: Option<String>,
    ) -> Result<PortfolioValue> {
        let all: Vec<&Holding> = holdings.iter().collect();
        let prices = self.latest_prices(symbols(&all)).await?;

        let mut total = Decimal::ZERO;
        for (holding, price) in all.iter().zip(prices) {
            total = market_value(&holding.symbol, price, holding.shares)?
                .checked_add(total)
                .ok_or_else(|| overflow("portfolio value", &holding.symbol))?;
        }

        debug!("Valued {} holdings at {}", holdings.len(), total);
        Ok(PortfolioValue {
            date: date.unwrap_or_else(|| DEFAULT_VALUATION_DATE.to_string()),
            total_value: normalize_price(total),
        })
    }

    async fn value_holding(&self, holding: &Holding) -> Result<HoldingValue> {
        let price = latest_price(self.price_provider.clone(), holding.symbol.clone()).await?;
        Ok(HoldingValue {
            symbol: holding.symbol.clone(),
            price,
            value: normalize_price(market_value(&holding.symbol, price, holding.shares)?),
        })
    }

    async fn compute_capital_gains(
        &self,
        holdings: &[Holding],
        range: &SharesRange,
    ) -> Result<Decimal> {
        let selected: Vec<&Holding> = holdings
            .iter()
            .filter(|holding| range.contains(holding.shares))
            .collect();

        let prices = self.latest_prices(symbols(&selected)).await?;

        let mut gains = Decimal::ZERO;
        for (holding, price) in selected.iter().zip(prices) {
            gains = capital_gain(holding, price)?
                .checked_add(gains)
                .ok_or_else(|| overflow("capital gains", &holding.symbol))?;
        }

        debug!(
            "Capital gains over {} of {} holdings: {}",
            selected.len(),
            holdings.len(),
            gains
        );
        Ok(gains)
    }
}
