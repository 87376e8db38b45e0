//! # Currency Types
//!
//! Domain types and port traits for the currency exchange-rate service.
//! This crate has ZERO external IO dependencies - only data structures,
//! rate arithmetic, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, CurrencyPair, RateTable, Product)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the RPC boundary
//! - `error/` - Cache and catalog error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CurrencyCode, CurrencyPair, Product, REFERENCE_CURRENCY, RateTable, UnsupportedCurrency,
};
pub use dto::*;
pub use error::{CatalogError, RateError};
pub use ports::{ExchangeError, ExchangeRateProvider, RateFeed};
