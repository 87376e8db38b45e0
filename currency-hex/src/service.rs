//! Rate Application Service
//!
//! The remote-callable boundary around the rate cache.
//! Contains NO transport logic - validation, delegation, and error translation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use currency_types::{
    CurrencyCode, CurrencyPair, ExchangeError, ExchangeRateProvider, HealthResponse, RateFeed,
    RateRequest, RateResponse, RatesResponse,
};
use exchange_rates::RateCache;
use tracing::{debug, error, info, warn};

/// Application service for rate queries.
///
/// Generic over `F: RateFeed` - the feed adapter is injected at compile time.
/// The service performs no retries; retry policy belongs to the caller.
pub struct RateService<F: RateFeed> {
    rates: Arc<RateCache<F>>,
}

impl<F: RateFeed> RateService<F> {
    /// Creates a new rate service over a ready cache.
    pub fn new(rates: Arc<RateCache<F>>) -> Self {
        Self { rates }
    }

    /// Returns the underlying cache.
    pub fn cache(&self) -> &Arc<RateCache<F>> {
        &self.rates
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Handles a `GetRate` call.
    ///
    /// Both codes must belong to the supported set before the cache is consulted.
    pub fn get_rate(&self, req: &RateRequest) -> Result<RateResponse, ExchangeError> {
        info!(base = %req.base, destination = %req.destination, "Handle GetRate");

        let pair = CurrencyPair::parse(&req.base, &req.destination)
            .map_err(ExchangeError::from)
            .inspect_err(|e| log_failure("GetRate", e))?;

        let rate = self.rate_for(pair)?;
        Ok(RateResponse { rate })
    }

    /// Rate for an already validated pair.
    pub fn rate_for(&self, pair: CurrencyPair) -> Result<f64, ExchangeError> {
        let rate = self
            .rates
            .rate(pair.base.code(), pair.destination.code())
            .map_err(ExchangeError::from)
            .inspect_err(|e| log_failure("GetRate", e))?;

        debug!(%pair, rate, identity = pair.is_identity(), "Resolved rate");
        Ok(rate)
    }

    /// Every rate from `base` to the supported currencies in the current table.
    pub fn list_rates(&self, base: &str) -> Result<RatesResponse, ExchangeError> {
        info!(base, "Handle ListRates");

        let base: CurrencyCode = base
            .parse()
            .map_err(ExchangeError::from)
            .inspect_err(|e| log_failure("ListRates", e))?;

        let rates: BTreeMap<CurrencyCode, f64> = self
            .rates
            .rates_from(base.code())
            .map_err(ExchangeError::from)
            .inspect_err(|e| log_failure("ListRates", e))?
            .into_iter()
            .filter_map(|(code, rate)| code.parse::<CurrencyCode>().ok().map(|code| (code, rate)))
            .collect();

        Ok(RatesResponse { base, rates })
    }

    /// Freshness of the current table.
    pub fn status(&self) -> HealthResponse {
        let table = self.rates.snapshot();
        HealthResponse {
            status: "healthy".into(),
            published: table.published(),
            fetched_at: table.fetched_at(),
            currencies: table.len(),
        }
    }
}

#[async_trait]
impl<F: RateFeed> ExchangeRateProvider for RateService<F> {
    async fn get_rate(
        &self,
        base: CurrencyCode,
        destination: CurrencyCode,
    ) -> Result<f64, ExchangeError> {
        info!(%base, %destination, "Handle GetRate");
        self.rate_for(CurrencyPair::new(base, destination))
    }
}

fn log_failure(operation: &str, err: &ExchangeError) {
    match err {
        ExchangeError::UnsupportedCurrency(code) | ExchangeError::UnknownCurrency(code) => {
            warn!(operation, currency = %code, error = %err, "Rate query failed");
        }
        ExchangeError::ServiceUnavailable(_) => {
            error!(operation, error = %err, "Rate query failed");
        }
    }
}
