//! Exchange Rates Cache
//!
//! Keeps one in-memory table of reference-relative rates (quoted against EUR),
//! refreshed wholesale from a feed, and answers cross-rate queries for any pair
//! of currencies in the table.
//!
//! - `cache` - [`RateCache`], the atomically swapped table
//! - `ecb` - decoder for the ECB reference-rate XML document
//! - `feed` - [`HttpFeed`], the HTTP adapter for the `RateFeed` port
//! - `refresher` - background task that refreshes a cache on an interval
//!
//! # Example
//! ```no_run
//! use exchange_rates::{HttpFeed, RateCache};
//!
//! # async fn run() -> Result<(), currency_types::RateError> {
//! let cache = RateCache::new(HttpFeed::ecb()).await?;
//! let rate = cache.rate("USD", "GBP")?;
//! println!("1 USD = {rate} GBP");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod ecb;
pub mod feed;
pub mod refresher;

pub use cache::{DEFAULT_FEED_TIMEOUT, RateCache};
pub use feed::{ECB_DAILY_URL, HttpFeed};
pub use refresher::{RefreshHandle, spawn_refresher};
