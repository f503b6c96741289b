use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use stockfolio_core::portfolio::SharesRange;

#[derive(Debug, Default, Deserialize)]
struct CapitalGainsQuery {
    portfolio: Option<String>,
    numsharesgt: Option<String>,
    numshareslt: Option<String>,
}

/// An empty bound is unbounded; anything else must be an integer.
fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("{} must be an integer", name))),
    }
}

impl CapitalGainsQuery {
    fn shares_range(&self) -> Result<SharesRange, ApiError> {
        Ok(SharesRange::new(
            parse_bound("numsharesgt", self.numsharesgt.as_deref())?,
            parse_bound("numshareslt", self.numshareslt.as_deref())?,
        ))
    }

    fn portfolio(&self) -> Option<&str> {
        self.portfolio.as_deref().filter(|name| !name.is_empty())
    }
}

async fn get_capital_gains(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CapitalGainsQuery>, QueryRejection>,
) -> ApiResult<Json<Decimal>> {
    let Query(query) = query?;
    let range = query.shares_range()?;
    let gains = state
        .capital_gains_service
        .capital_gains(query.portfolio(), &range)
        .await?;
    Ok(Json(gains))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/capital-gains", get(get_capital_gains))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let query = CapitalGainsQuery {
            portfolio: Some(String::new()),
            numsharesgt: Some("5".into()),
            numshareslt: Some("".into()),
        };
        assert_eq!(query.shares_range().unwrap(), SharesRange::new(Some(5), None));
        assert_eq!(query.portfolio(), None);
    }

    #[test]
    fn test_non_integer_bound_is_rejected() {
        let query = CapitalGainsQuery {
            numsharesgt: Some("5.5".into()),
            ..Default::default()
        };
        assert!(query.shares_range().is_err());
    }
}
