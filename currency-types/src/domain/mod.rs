//! Domain models for the exchange-rate service.

pub mod currency;
pub mod pair;
pub mod product;
pub mod rates;

pub use currency::{CurrencyCode, REFERENCE_CURRENCY, UnsupportedCurrency};
pub use pair::CurrencyPair;
pub use product::Product;
pub use rates::RateTable;
