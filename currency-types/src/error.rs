//! Error types for the exchange-rate service.

/// Rate cache errors.
///
/// Feed errors are recoverable: the cache keeps serving its last good table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error("Rate feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Rate feed malformed: {0}")]
    FeedMalformed(String),

    #[error("Rate not found for currency {0}")]
    UnknownCurrency(String),
}

/// Product catalog errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(u32),
}
