//! Catalog product as seen by the pricing client.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product listed in the catalog.
///
/// `price` is denominated in the reference currency unless the product was
/// returned from a conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: u32,
    #[schema(example = "Latte")]
    pub name: String,
    #[schema(example = "Frothy milky coffee")]
    pub description: String,
    #[schema(example = 4.25)]
    pub price: f64,
    #[schema(example = "abc-123")]
    pub sku: String,
}

impl Product {
    /// Returns a copy with the price multiplied by `rate`.
    ///
    /// The price is rounded to four decimal places, half away from zero, so
    /// that binary float noise never leaks into listed prices.
    pub fn priced_at(&self, rate: f64) -> Self {
        Self {
            price: round_price(self.price * rate),
            ..self.clone()
        }
    }
}

fn round_price(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
