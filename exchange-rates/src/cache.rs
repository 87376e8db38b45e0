//! The exchange rate cache.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use currency_types::{RateError, RateFeed, RateTable};
use tracing::{debug, info, warn};

/// Upper bound on a single feed fetch.
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// In-memory cache holding exactly one [`RateTable`].
///
/// Readers clone the `Arc` under a short read lock and compute on their own
/// snapshot. A refresh fetches without holding the lock and only takes the
/// write lock to swap the pointer, so queries never wait on the network and
/// never see a half-updated table.
pub struct RateCache<F: RateFeed> {
    feed: F,
    table: RwLock<Arc<RateTable>>,
    timeout: Duration,
}

impl<F: RateFeed> RateCache<F> {
    /// Creates a cache and performs the initial fetch.
    ///
    /// Fails if the initial fetch fails: a cache never exists without a table.
    pub async fn new(feed: F) -> Result<Self, RateError> {
        Self::with_timeout(feed, DEFAULT_FEED_TIMEOUT).await
    }

    /// Creates a cache whose fetches are bounded by `timeout`.
    pub async fn with_timeout(feed: F, timeout: Duration) -> Result<Self, RateError> {
        let table = fetch_within(&feed, timeout).await.inspect_err(|e| {
            warn!(error = %e, "Initial rate fetch failed");
        })?;

        info!(
            currencies = table.len(),
            published = ?table.published(),
            "Rate cache ready"
        );

        Ok(Self {
            feed,
            table: RwLock::new(Arc::new(table)),
            timeout,
        })
    }

    /// Fetches a fresh table and swaps it in.
    ///
    /// All-or-nothing: on error the current table stays in place. Dropping the
    /// returned future before it completes has the same effect.
    pub async fn refresh(&self) -> Result<(), RateError> {
        let table = match fetch_within(&self.feed, self.timeout).await {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Rate refresh failed, keeping current table");
                return Err(e);
            }
        };

        debug!(
            currencies = table.len(),
            published = ?table.published(),
            "Swapping in refreshed rate table"
        );

        {
            let mut current = self.table.write().unwrap_or_else(PoisonError::into_inner);
            *current = Arc::new(table);
        }

        Ok(())
    }

    /// Returns the feed this cache refreshes from.
    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Returns the current table.
    pub fn snapshot(&self) -> Arc<RateTable> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Factor such that `amount_in_destination = amount_in_base * rate`.
    pub fn rate(&self, base: &str, destination: &str) -> Result<f64, RateError> {
        self.snapshot().cross_rate(base, destination)
    }

    /// Every cross rate from `base`, computed against a single snapshot.
    pub fn rates_from(&self, base: &str) -> Result<BTreeMap<String, f64>, RateError> {
        let table = self.snapshot();
        let base_rate = table
            .get(base)
            .ok_or_else(|| RateError::UnknownCurrency(base.to_string()))?;

        Ok(table
            .currencies()
            .filter_map(|code| {
                let rate = if code == base {
                    1.0
                } else {
                    table.get(code)? / base_rate
                };
                Some((code.to_string(), rate))
            })
            .collect())
    }
}

async fn fetch_within<F: RateFeed>(feed: &F, timeout: Duration) -> Result<RateTable, RateError> {
    match tokio::time::timeout(timeout, feed.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(RateError::FeedUnavailable(format!(
            "fetch did not complete within {}ms",
            timeout.as_millis()
        ))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Feed that replays a fixed script of results, repeating the last one.
    pub struct ScriptedFeed {
        script: Mutex<VecDeque<Result<RateTable, RateError>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedFeed {
        pub fn new(script: Vec<Result<RateTable, RateError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn calls(&self) -> Arc<AtomicUsize> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl RateFeed for ScriptedFeed {
        async fn fetch(&self) -> Result<RateTable, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap()
            }
        }
    }

    /// Feed that never answers.
    struct StalledFeed;

    #[async_trait]
    impl RateFeed for StalledFeed {
        async fn fetch(&self) -> Result<RateTable, RateError> {
            std::future::pending().await
        }
    }

    pub fn sample_table() -> RateTable {
        RateTable::new([("USD", 1.1), ("GBP", 0.85)], None)
    }

    fn doubled_table() -> RateTable {
        RateTable::new([("USD", 2.2), ("GBP", 1.7), ("JPY", 160.0)], None)
    }

    #[tokio::test]
    async fn test_concrete_scenario() {
        let cache = RateCache::new(ScriptedFeed::new(vec![Ok(sample_table())]))
            .await
            .unwrap();

        assert_eq!(cache.rate("EUR", "USD").unwrap(), 1.1);
        assert!((cache.rate("USD", "GBP").unwrap() - 0.7727).abs() < 1e-4);
        assert_eq!(cache.rate("GBP", "GBP").unwrap(), 1.0);
        assert_eq!(
            cache.rate("EUR", "JPY"),
            Err(RateError::UnknownCurrency("JPY".into()))
        );
    }

    #[tokio::test]
    async fn test_initial_fetch_failure_propagates() {
        let feed = ScriptedFeed::new(vec![Err(RateError::FeedUnavailable("down".into()))]);
        let result = RateCache::new(feed).await;
        assert!(matches!(result, Err(RateError::FeedUnavailable(_))));
    }

    #[tokio::test]
    async fn test_refresh_swaps_table() {
        let feed = ScriptedFeed::new(vec![Ok(sample_table()), Ok(doubled_table())]);
        let cache = RateCache::new(feed).await.unwrap();

        assert!(cache.rate("EUR", "JPY").is_err());
        cache.refresh().await.unwrap();

        assert_eq!(cache.rate("EUR", "USD").unwrap(), 2.2);
        assert_eq!(cache.rate("EUR", "JPY").unwrap(), 160.0);
        assert_eq!(cache.rate("EUR", "EUR").unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_rates() {
        for failure in [
            RateError::FeedUnavailable("connection reset".into()),
            RateError::FeedMalformed("invalid rate".into()),
        ] {
            let feed = ScriptedFeed::new(vec![Ok(sample_table()), Err(failure.clone())]);
            let cache = RateCache::new(feed).await.unwrap();
            let before = cache.snapshot();

            assert_eq!(cache.refresh().await, Err(failure));

            let after = cache.snapshot();
            assert!(Arc::ptr_eq(&before, &after));
            for a in before.currencies() {
                for b in before.currencies() {
                    assert_eq!(cache.rate(a, b), before.cross_rate(a, b));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_without_usable_rates_keeps_table() {
        let unusable = crate::ecb::decode(crate::ecb::tests::NO_USABLE_RATES);
        let feed = ScriptedFeed::new(vec![Ok(sample_table()), unusable]);
        let cache = RateCache::new(feed).await.unwrap();
        let before = cache.snapshot();

        assert!(matches!(
            cache.refresh().await,
            Err(RateError::FeedMalformed(_))
        ));
        assert!(Arc::ptr_eq(&before, &cache.snapshot()));
        assert_eq!(cache.rate("EUR", "USD").unwrap(), 1.1);
    }

    #[tokio::test]
    async fn test_stalled_refresh_times_out_and_keeps_table() {
        let feed = ScriptedFeed::new(vec![Ok(sample_table())]);
        let cache = RateCache::with_timeout(feed, Duration::from_millis(20))
            .await
            .unwrap();
        let before = cache.snapshot();

        let stalled = RateCache {
            feed: StalledFeed,
            table: RwLock::new(before.clone()),
            timeout: Duration::from_millis(20),
        };
        let err = stalled.refresh().await.unwrap_err();
        assert!(matches!(err, RateError::FeedUnavailable(_)));
        assert!(Arc::ptr_eq(&before, &stalled.snapshot()));
    }

    #[tokio::test]
    async fn test_stalled_initial_fetch_fails() {
        let result = RateCache::with_timeout(StalledFeed, Duration::from_millis(20)).await;
        assert!(matches!(result, Err(RateError::FeedUnavailable(_))));
    }

    #[tokio::test]
    async fn test_cancelled_refresh_keeps_table() {
        let feed = ScriptedFeed::new(vec![Ok(sample_table())]);
        let cache = RateCache::new(feed).await.unwrap();
        let before = cache.snapshot();

        let stalled = RateCache {
            feed: StalledFeed,
            table: RwLock::new(before.clone()),
            timeout: Duration::from_secs(60),
        };
        let refresh = stalled.refresh();
        let cancelled = tokio::time::timeout(Duration::from_millis(10), refresh).await;
        assert!(cancelled.is_err());
        assert!(Arc::ptr_eq(&before, &stalled.snapshot()));
    }

    #[tokio::test]
    async fn test_rates_from_base() {
        let cache = RateCache::new(ScriptedFeed::new(vec![Ok(sample_table())]))
            .await
            .unwrap();

        let rates = cache.rates_from("USD").unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates["USD"], 1.0);
        assert!((rates["EUR"] - 1.0 / 1.1).abs() < 1e-12);
        assert!((rates["GBP"] - 0.85 / 1.1).abs() < 1e-12);

        assert_eq!(
            cache.rates_from("CHF"),
            Err(RateError::UnknownCurrency("CHF".into()))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_mixed_tables() {
        // Both tables agree on USD/GBP; a mixed read would not.
        let feed = ScriptedFeed::new(vec![Ok(sample_table()), Ok(doubled_table())]);
        let cache = Arc::new(RateCache::new(feed).await.unwrap());
        let expected = 0.85 / 1.1;

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for _ in 0..2_000 {
                        let table = cache.snapshot();
                        let usd = table.get("USD").unwrap();
                        let gbp = table.get("GBP").unwrap();
                        assert!((gbp / usd - expected).abs() < 1e-12);
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            cache.refresh().await.unwrap();
            tokio::task::yield_now().await;
        }

        for reader in readers {
            reader.await.unwrap();
        }
        assert_eq!(cache.rate("EUR", "USD").unwrap(), 2.2);
    }
}
