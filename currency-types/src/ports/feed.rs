//! Rate feed port.
//!
//! The cache pulls whole tables through this trait. Implementations can be
//! HTTP adapters, fixed tables for tests, etc.

use crate::domain::RateTable;
use crate::error::RateError;

/// Port trait for sources of reference-relative rate tables.
#[async_trait::async_trait]
pub trait RateFeed: Send + Sync {
    /// Fetches and decodes one complete table.
    ///
    /// Transport failures and non-success statuses are
    /// [`RateError::FeedUnavailable`]; payloads that do not decode into
    /// well-formed entries are [`RateError::FeedMalformed`].
    async fn fetch(&self) -> Result<RateTable, RateError>;
}
