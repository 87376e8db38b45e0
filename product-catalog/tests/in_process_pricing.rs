//! Catalog priced through the in-process rate service.

use std::sync::Arc;

use async_trait::async_trait;
use currency_hex::RateService;
use currency_types::{CurrencyCode, RateError, RateFeed, RateTable};
use exchange_rates::RateCache;
use product_catalog::ProductCatalog;

struct FixedFeed;

#[async_trait]
impl RateFeed for FixedFeed {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        Ok(RateTable::new([("USD", 1.1), ("GBP", 0.85)], None))
    }
}

async fn catalog() -> ProductCatalog<RateService<FixedFeed>> {
    let cache = RateCache::new(FixedFeed).await.unwrap();
    ProductCatalog::new(RateService::new(Arc::new(cache)))
}

#[tokio::test]
async fn test_latte_priced_in_dollars() {
    let priced = catalog().await.get(1, Some(CurrencyCode::USD)).await.unwrap();
    assert_eq!(priced.currency, CurrencyCode::USD);
    assert_eq!(priced.value.price, 4.675);
}

#[tokio::test]
async fn test_pounds_round_to_four_places() {
    let priced = catalog().await.list(Some(CurrencyCode::GBP)).await;
    assert_eq!(priced.currency, CurrencyCode::GBP);
    assert_eq!(priced.value[0].price, 3.6125);
    assert_eq!(priced.value[1].price, 1.7);
}

#[tokio::test]
async fn test_currency_missing_from_feed_degrades_to_euros() {
    let priced = catalog().await.list(Some(CurrencyCode::JPY)).await;
    assert_eq!(priced.currency, CurrencyCode::EUR);
    assert_eq!(priced.value[0].price, 4.25);
}
