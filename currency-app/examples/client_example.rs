//! Client example pricing the catalog against a running rate server.
//!
//! Run with: cargo run -p currency-app --example client_example

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use currency_client::RatesClient;
use currency_hex::{RateService, inbound::HttpServer};
use currency_types::{CurrencyCode, RateError, RateFeed, RateTable};
use exchange_rates::{RateCache, ecb};
use product_catalog::ProductCatalog;
use tokio::net::TcpListener;

const SNAPSHOT: &str = r#"<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01" xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref">
    <Cube>
        <Cube time="2024-01-05">
            <Cube currency="USD" rate="1.0921"/>
            <Cube currency="JPY" rate="158.08"/>
            <Cube currency="GBP" rate="0.86035"/>
        </Cube>
    </Cube>
</gesmes:Envelope>"#;

/// Serves a fixed snapshot instead of calling the ECB.
struct SnapshotFeed;

#[async_trait]
impl RateFeed for SnapshotFeed {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        ecb::decode(SNAPSHOT)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    println!("🚀 Starting server on {addr}...");

    // Start server in background
    let cache = Arc::new(RateCache::new(SnapshotFeed).await?);
    let server = HttpServer::new(RateService::new(cache));
    let router = server.router();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>()).await {
            eprintln!("server error: {e}");
        }
    });

    // Create client
    let client = RatesClient::new(format!("http://{addr}")).with_client_id("example");

    let health = client.health().await?;
    println!(
        "✅ Server health: {} ({} currencies, published {:?})",
        health.status, health.currencies, health.published
    );

    let rate = client.fetch_rate("USD", "GBP").await?;
    println!("✅ 1 USD = {:.4} GBP", rate.rate);

    match client.fetch_rate("EUR", "XYZ").await {
        Ok(_) => println!("❌ unexpected rate for XYZ"),
        Err(e) => println!("✅ Unsupported code rejected: {e}"),
    }

    // Price the catalog through the remote client
    let catalog = ProductCatalog::new(client);
    for currency in [CurrencyCode::USD, CurrencyCode::GBP, CurrencyCode::CHF] {
        let priced = catalog.list(Some(currency)).await;
        println!("\n📋 Requested {currency}, priced in {}:", priced.currency);
        for product in priced.value {
            println!(
                "   - {} ({}): {}{:.2}",
                product.name,
                product.sku,
                priced.currency.symbol(),
                product.price
            );
        }
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
