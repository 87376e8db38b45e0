//! # Currency Hex
//!
//! Rate service layer and HTTP RPC adapter for the exchange-rate service.
//!
//! ## Architecture
//!
//! - `service/` - Rate service (validates currencies, delegates to the cache)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - Generated API description
//!
//! The service is generic over `F: RateFeed`, so the cache can be fed by the
//! HTTP adapter in production and by fixed tables in tests.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::RateService;
