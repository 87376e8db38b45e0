//! # Product Catalog
//!
//! A hard-coded product list whose prices are listed in the reference
//! currency and converted on request through any `ExchangeRateProvider`.
//!
//! Conversion never fails a request: when the rate cannot be obtained the
//! failure is logged and the prices come back unconverted, tagged with the
//! reference currency so the caller can tell.

use currency_types::{
    CatalogError, CurrencyCode, ExchangeRateProvider, Product, REFERENCE_CURRENCY,
};
use serde::Serialize;
use tracing::{debug, error};

/// A value together with the currency its prices are expressed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Priced<T> {
    pub currency: CurrencyCode,
    pub value: T,
}

/// Read-only product catalog priced through a rate provider.
pub struct ProductCatalog<P: ExchangeRateProvider> {
    rates: P,
    products: Vec<Product>,
}

impl<P: ExchangeRateProvider> ProductCatalog<P> {
    /// Creates a catalog with the default product list.
    pub fn new(rates: P) -> Self {
        Self::with_products(rates, default_products())
    }

    pub fn with_products(rates: P, products: Vec<Product>) -> Self {
        Self { rates, products }
    }

    /// Lists all products, priced in `currency` when given.
    pub async fn list(&self, currency: Option<CurrencyCode>) -> Priced<Vec<Product>> {
        match self.rate_to(currency).await {
            Some((currency, rate)) => Priced {
                currency,
                value: self.products.iter().map(|p| p.priced_at(rate)).collect(),
            },
            None => Priced {
                currency: REFERENCE_CURRENCY,
                value: self.products.clone(),
            },
        }
    }

    /// Gets one product, priced in `currency` when given.
    pub async fn get(
        &self,
        id: u32,
        currency: Option<CurrencyCode>,
    ) -> Result<Priced<Product>, CatalogError> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CatalogError::ProductNotFound(id))?;

        Ok(match self.rate_to(currency).await {
            Some((currency, rate)) => Priced {
                currency,
                value: product.priced_at(rate),
            },
            None => Priced {
                currency: REFERENCE_CURRENCY,
                value: product.clone(),
            },
        })
    }

    /// One `GetRate` call per conversion request; `None` means list unconverted.
    async fn rate_to(&self, currency: Option<CurrencyCode>) -> Option<(CurrencyCode, f64)> {
        let destination = currency?;
        match self.rates.get_rate(REFERENCE_CURRENCY, destination).await {
            Ok(rate) => {
                debug!(%destination, rate, "Converting catalog prices");
                Some((destination, rate))
            }
            Err(e) => {
                error!(%destination, error = %e, "Error doing currency conversion, returning unconverted prices");
                None
            }
        }
    }
}

/// The example product list.
pub fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Latte".into(),
            description: "Frothy milky coffee".into(),
            price: 4.25,
            sku: "abc-123".into(),
        },
        Product {
            id: 2,
            name: "Espresso".into(),
            description: "Short and strong coffee without milk".into(),
            price: 2.00,
            sku: "fjk-123".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use currency_types::ExchangeError;

    use super::*;

    /// Provider knowing only EUR→USD = 1.1.
    struct FakeRates {
        calls: AtomicUsize,
    }

    impl FakeRates {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ExchangeRateProvider for FakeRates {
        async fn get_rate(
            &self,
            base: CurrencyCode,
            destination: CurrencyCode,
        ) -> Result<f64, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(base, CurrencyCode::EUR);
            match destination {
                CurrencyCode::EUR => Ok(1.0),
                CurrencyCode::USD => Ok(1.1),
                CurrencyCode::CHF => Err(ExchangeError::ServiceUnavailable("down".into())),
                other => Err(ExchangeError::UnknownCurrency(other.code().into())),
            }
        }
    }

    #[tokio::test]
    async fn test_list_without_currency_skips_provider() {
        let catalog = ProductCatalog::new(FakeRates::new());
        let priced = catalog.list(None).await;
        assert_eq!(priced.currency, CurrencyCode::EUR);
        assert_eq!(priced.value, default_products());
        assert_eq!(catalog.rates.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_list_converts_with_one_rate_call() {
        let catalog = ProductCatalog::new(FakeRates::new());
        let priced = catalog.list(Some(CurrencyCode::USD)).await;
        assert_eq!(priced.currency, CurrencyCode::USD);
        assert_eq!(priced.value[0].price, 4.675);
        assert_eq!(priced.value[1].price, 2.2);
        assert_eq!(catalog.rates.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_conversion_failure_returns_unconverted_prices() {
        let catalog = ProductCatalog::new(FakeRates::new());

        for currency in [CurrencyCode::JPY, CurrencyCode::CHF] {
            let priced = catalog.list(Some(currency)).await;
            assert_eq!(priced.currency, CurrencyCode::EUR);
            assert_eq!(priced.value, default_products());
        }
    }

    #[tokio::test]
    async fn test_get_converts_single_product() {
        let catalog = ProductCatalog::new(FakeRates::new());
        let priced = catalog.get(1, Some(CurrencyCode::USD)).await.unwrap();
        assert_eq!(priced.currency, CurrencyCode::USD);
        assert_eq!(priced.value.name, "Latte");
        assert_eq!(priced.value.price, 4.675);
    }

    #[tokio::test]
    async fn test_get_unknown_product() {
        let catalog = ProductCatalog::new(FakeRates::new());
        assert_eq!(
            catalog.get(42, Some(CurrencyCode::USD)).await.unwrap_err(),
            CatalogError::ProductNotFound(42)
        );
        assert_eq!(catalog.rates.calls.load(Ordering::SeqCst), 0);
    }
}
