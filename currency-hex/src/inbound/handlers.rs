//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use currency_types::{ErrorResponse, ExchangeError, RateFeed, RateRequest};

use crate::RateService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<F: RateFeed> {
    pub service: RateService<F>,
}

/// Wrapper to implement IntoResponse for ExchangeError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub ExchangeError);

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ExchangeError::UnsupportedCurrency(_) => StatusCode::BAD_REQUEST,
            ExchangeError::UnknownCurrency(_) => StatusCode::NOT_FOUND,
            ExchangeError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.0.to_string(),
            code: status.as_u16(),
            currency: self.0.currency().map(str::to_string),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint, reporting the age of the cached table.
pub async fn health<F: RateFeed>(State(state): State<Arc<AppState<F>>>) -> impl IntoResponse {
    Json(state.service.status())
}

/// The `GetRate` remote procedure.
#[tracing::instrument(skip(state))]
pub async fn get_rate<F: RateFeed>(
    State(state): State<Arc<AppState<F>>>,
    Json(req): Json<RateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let resp = state.service.get_rate(&req)?;
    Ok(Json(resp))
}

/// All rates from one base currency.
#[tracing::instrument(skip(state))]
pub async fn list_rates<F: RateFeed>(
    State(state): State<Arc<AppState<F>>>,
    Path(base): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let resp = state.service.list_rates(&base)?;
    Ok(Json(resp))
}

/// Generated OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "No such procedure".into(),
            code: StatusCode::NOT_FOUND.as_u16(),
            currency: None,
        }),
    )
}
