//! Portfolio valuation domain models.

use rust_decimal::Decimal;
use serde::Serialize;

/// Total market value of a set of holdings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PortfolioValue {
    /// Caller-supplied label, carried through verbatim.
    pub date: String,
    #[serde(rename = "portfolio value")]
    pub total_value: Decimal,
}

/// Market value of a single holding.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HoldingValue {
    pub symbol: String,
    /// Current unit price as quoted.
    #[serde(rename = "ticker")]
    pub price: Decimal,
    #[serde(rename = "stock value")]
    pub value: Decimal,
}

/// Open share-count interval used to select holdings for capital gains.
///
/// Both bounds are strict and an absent bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SharesRange {
    pub greater_than: Option<i64>,
    pub less_than: Option<i64>,
}

impl SharesRange {
    pub fn new(greater_than: Option<i64>, less_than: Option<i64>) -> Self {
        Self {
            greater_than,
            less_than,
        }
    }

    pub fn contains(&self, shares: i64) -> bool {
        self.greater_than.map_or(true, |min| shares > min)
            && self.less_than.map_or(true, |max| shares < max)
    }
}
