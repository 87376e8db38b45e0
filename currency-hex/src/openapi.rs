//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use currency_types::domain::CurrencyCode;
use currency_types::dto::{
    ErrorResponse, HealthResponse, RateRequest, RateResponse, RatesResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health and freshness of the cached rate table
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Exchange rate between two currencies
///
/// Multiply an amount in `base` by the returned rate to obtain the amount in
/// `destination`.
#[utoipa::path(
    post,
    path = "/currency.Currency/GetRate",
    tag = "rates",
    request_body = RateRequest,
    params(
        ("x-client-id" = Option<String>, Header, description = "Client identifier recorded in logs")
    ),
    responses(
        (status = 200, description = "Rate found", body = RateResponse),
        (status = 400, description = "Currency outside the supported set", body = ErrorResponse),
        (status = 404, description = "Currency missing from the current rate table", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded"),
        (status = 503, description = "Rate feed unavailable", body = ErrorResponse)
    )
)]
async fn get_rate() {}

/// All rates from one base currency
#[utoipa::path(
    get,
    path = "/api/rates/{base}",
    tag = "rates",
    params(
        ("base" = String, Path, description = "Base currency code")
    ),
    responses(
        (status = 200, description = "Rates from base", body = RatesResponse),
        (status = 400, description = "Currency outside the supported set", body = ErrorResponse),
        (status = 404, description = "Currency missing from the current rate table", body = ErrorResponse)
    )
)]
async fn list_rates() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency API",
        version = "0.1.0",
        description = "Cross rates computed from the ECB daily euro reference rates"
    ),
    paths(health, get_rate, list_rates),
    components(
        schemas(
            RateRequest,
            RateResponse,
            RatesResponse,
            HealthResponse,
            ErrorResponse,
            CurrencyCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Exchange rate queries"),
    )
)]
pub struct ApiDoc;
