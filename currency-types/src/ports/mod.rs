//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The cache and the catalog depend on these traits, not concrete implementations.

mod exchange;
mod feed;

pub use exchange::{ExchangeError, ExchangeRateProvider};
pub use feed::RateFeed;
