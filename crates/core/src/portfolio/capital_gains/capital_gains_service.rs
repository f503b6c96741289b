//! Capital gains across several holding sources.
//!
//! Sources are gathered leniently: one that cannot be fetched is logged and
//! left out. Prices are not: any price failure fails the computation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::holdings::Holding;
use crate::portfolio::sources::HoldingSourceTrait;
use crate::portfolio::valuation::{SharesRange, ValuationServiceTrait};

#[async_trait]
pub trait CapitalGainsServiceTrait: Send + Sync {
    /// Capital gains over the holdings of `portfolio`, or of every
    /// configured source when `None`, restricted to `range`.
    async fn capital_gains(&self, portfolio: Option<&str>, range: &SharesRange)
        -> Result<Decimal>;
}

pub struct CapitalGainsService {
    sources: Vec<Arc<dyn HoldingSourceTrait>>,
    valuation: Arc<dyn ValuationServiceTrait>,
}

impl CapitalGainsService {
    pub fn new(
        sources: Vec<Arc<dyn HoldingSourceTrait>>,
        valuation: Arc<dyn ValuationServiceTrait>,
    ) -> Self {
        Self { sources, valuation }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    /// Fetches the selected sources and merges their holdings by symbol;
    /// a later source replaces an earlier one's holding of the same symbol.
    async fn gather(&self, portfolio: Option<&str>) -> Vec<Holding> {
        let selected: Vec<&Arc<dyn HoldingSourceTrait>> = self
            .sources
            .iter()
            .filter(|source| portfolio.map_or(true, |name| source.name() == name))
            .collect();

        if selected.is_empty() {
            if let Some(name) = portfolio {
                warn!("Unknown portfolio '{}', no holdings gathered", name);
            }
            return Vec::new();
        }

        let fetched = join_all(selected.iter().map(|source| source.fetch_holdings())).await;

        let mut merged: Vec<Holding> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (source, result) in selected.iter().zip(fetched) {
            let holdings = match result {
                Ok(holdings) => holdings,
                Err(e) => {
                    warn!("Skipping holdings of '{}': {}", source.name(), e);
                    continue;
                }
            };
            debug!("Gathered {} holdings from '{}'", holdings.len(), source.name());
            for holding in holdings {
                match positions.get(&holding.symbol) {
                    Some(&index) => merged[index] = holding,
                    None => {
                        positions.insert(holding.symbol.clone(), merged.len());
                        merged.push(holding);
                    }
                }
            }
        }
        merged
    }
}

#[async_trait]
impl CapitalGainsServiceTrait for CapitalGainsService {
    async fn capital_gains(
        &self,
        portfolio: Option<&str>,
        range: &SharesRange,
    ) -> Result<Decimal> {
        let holdings = self.gather(portfolio).await;
        self.valuation.compute_capital_gains(&holdings, range).await
    }
}
