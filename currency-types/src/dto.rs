//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request for the rate between two currencies.
///
/// Codes travel as plain strings so that unsupported codes are reported by
/// name instead of failing body deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateRequest {
    #[schema(example = "EUR")]
    pub base: String,
    #[schema(example = "USD")]
    pub destination: String,
}

impl RateRequest {
    pub fn new(base: CurrencyCode, destination: CurrencyCode) -> Self {
        Self {
            base: base.code().to_string(),
            destination: destination.code().to_string(),
        }
    }
}

/// Response carrying one conversion factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateResponse {
    /// Multiply an amount in the base currency by this to get the destination amount
    #[schema(example = 1.0921)]
    pub rate: f64,
}

/// All known rates from one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatesResponse {
    pub base: CurrencyCode,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Status DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Health and freshness of the cached rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// Publication date reported by the feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<NaiveDate>,
    /// When the current table was fetched
    pub fetched_at: DateTime<Utc>,
    /// Number of currencies in the current table
    #[schema(example = 31)]
    pub currencies: usize,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Rate not found for currency JPY")]
    pub error: String,
    #[schema(example = 404)]
    pub code: u16,
    /// The currency code the error is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "JPY")]
    pub currency: Option<String>,
}
