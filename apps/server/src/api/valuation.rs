use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use stockfolio_core::holdings::HoldingFilter;
use stockfolio_core::portfolio::{HoldingValue, PortfolioValue};

/// Query parameter carrying the portfolio valuation label.
const DATE_PARAM: &str = "date";

async fn get_stock_value(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HoldingValue>> {
    let holding = state.holding_service.get_holding(&id)?;
    let value = state.valuation_service.value_holding(&holding).await?;
    Ok(Json(value))
}

async fn get_portfolio_value(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<PortfolioValue>> {
    let Query(pairs) = query?;
    let (dates, conditions): (Vec<_>, Vec<_>) =
        pairs.into_iter().partition(|(key, _)| key == DATE_PARAM);
    let date = dates.into_iter().last().map(|(_, value)| value);

    let holdings = state
        .holding_service
        .list_holdings(&HoldingFilter::from_query_pairs(conditions)?)?;
    let value = state
        .valuation_service
        .value_portfolio(&holdings, date)
        .await?;
    Ok(Json(value))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stock-value/{id}", get(get_stock_value))
        .route("/portfolio-value", get(get_portfolio_value))
}
