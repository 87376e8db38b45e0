//! Exchange rate provider port.
//!
//! This trait defines the interface the pricing client consumes.
//! Implementations can be the in-process rate service, HTTP clients, mock providers, etc.

use crate::domain::{CurrencyCode, UnsupportedCurrency};
use crate::error::RateError;

/// Error type for exchange rate operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExchangeError {
    /// The code is outside the supported enumeration.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// The code is supported but missing from the current rate table.
    #[error("Rate not found for currency {0}")]
    UnknownCurrency(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ExchangeError {
    /// The currency code the error is about, when there is one.
    pub fn currency(&self) -> Option<&str> {
        match self {
            ExchangeError::UnsupportedCurrency(code) | ExchangeError::UnknownCurrency(code) => {
                Some(code.as_str())
            }
            ExchangeError::ServiceUnavailable(_) => None,
        }
    }
}

impl From<RateError> for ExchangeError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::UnknownCurrency(code) => ExchangeError::UnknownCurrency(code),
            RateError::FeedUnavailable(_) | RateError::FeedMalformed(_) => {
                ExchangeError::ServiceUnavailable(err.to_string())
            }
        }
    }
}

impl From<UnsupportedCurrency> for ExchangeError {
    fn from(err: UnsupportedCurrency) -> Self {
        ExchangeError::UnsupportedCurrency(err.0)
    }
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Get the exchange rate from one currency to another.
    /// Returns how many units of `destination` you get for 1 unit of `base`.
    async fn get_rate(
        &self,
        base: CurrencyCode,
        destination: CurrencyCode,
    ) -> Result<f64, ExchangeError>;
}
