use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use stockfolio_core::holdings::{Holding, HoldingFilter, HoldingPayload};

async fn create_stock(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(body) = payload?;
    let id = state
        .holding_service
        .create_holding(HoldingPayload::from_value(body)?)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn list_stocks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<Holding>>> {
    let Query(pairs) = query?;
    let filter = HoldingFilter::from_query_pairs(pairs)?;
    Ok(Json(state.holding_service.list_holdings(&filter)?))
}

async fn get_stock(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Holding>> {
    Ok(Json(state.holding_service.get_holding(&id)?))
}

async fn update_stock(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = payload?;
    let id = state
        .holding_service
        .update_holding(&id, HoldingPayload::from_value(body)?)
        .await?;
    Ok(Json(json!({ "id": id })))
}

async fn delete_stock(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.holding_service.delete_holding(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks", get(list_stocks).post(create_stock))
        .route(
            "/stocks/{id}",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
}
