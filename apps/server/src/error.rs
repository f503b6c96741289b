use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stockfolio_core::errors::Error as CoreError;
use thiserror::Error;

const MALFORMED_DATA: &str = "Malformed data";
const NOT_FOUND: &str = "Not found";
const EXPECTED_JSON: &str = "Expected application/json media type";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("Unsupported media type")]
    UnsupportedMediaType,
}

fn client_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn server_error(description: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "server error": description })),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) | CoreError::AlreadyExists(_) => {
                    tracing::debug!("Rejected request: {}", e);
                    client_error(StatusCode::BAD_REQUEST, MALFORMED_DATA)
                }
                CoreError::NotFound(_) => client_error(StatusCode::NOT_FOUND, NOT_FOUND),
                CoreError::MarketData { .. } => {
                    tracing::warn!("{}", e);
                    server_error("Price service unavailable")
                }
                CoreError::Database(_) => {
                    tracing::error!("{}", e);
                    server_error("Storage unavailable")
                }
                _ => {
                    tracing::error!("{}", e);
                    server_error("Internal server error")
                }
            },
            ApiError::NotFound => client_error(StatusCode::NOT_FOUND, NOT_FOUND),
            ApiError::BadRequest(reason) => {
                tracing::debug!("Rejected request: {}", reason);
                client_error(StatusCode::BAD_REQUEST, MALFORMED_DATA)
            }
            ApiError::UnsupportedMediaType => {
                client_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, EXPECTED_JSON)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;
    use stockfolio_core::errors::{DatabaseError, ValidationError};
    use stockfolio_market_data::MarketDataError;

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_and_conflicts_are_malformed_data() {
        let (status, body) = render(ApiError::Core(CoreError::Validation(
            ValidationError::MissingField("symbol".into()),
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Malformed data"}));

        let (status, _) = render(ApiError::Core(CoreError::AlreadyExists("AAPL".into()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) = render(ApiError::Core(CoreError::NotFound("x".into()))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let (status, body) = render(ApiError::Core(CoreError::MarketData {
            symbol: "AAPL".into(),
            source: MarketDataError::HttpStatus {
                provider: "API_NINJAS".into(),
                status: 429,
            },
        }))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"server error": "Price service unavailable"}));

        let (status, body) = render(ApiError::Core(CoreError::Database(
            DatabaseError::QueryFailed("no such table: documents".into()),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("documents"));

        let (status, body) = render(ApiError::Core(CoreError::Overflow(
            "capital gain of BIG".into(),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"server error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_unsupported_media_type() {
        let (status, body) = render(ApiError::UnsupportedMediaType).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body, json!({"error": "Expected application/json media type"}));
    }
}
