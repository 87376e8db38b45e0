//! Currency CLI
//!
//! Command-line interface for the exchange-rate API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use currency_client::RatesClient;
use currency_types::CurrencyCode;
use product_catalog::ProductCatalog;

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange-rate API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the currency API
    #[arg(
        long,
        env = "CURRENCY_API_URL",
        default_value = "http://localhost:9092"
    )]
    api_url: String,

    /// Client identifier sent for rate limiting
    #[arg(long, env = "CURRENCY_CLIENT_ID")]
    client_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the rate between two currencies
    Rate {
        /// Base currency (e.g. EUR)
        base: String,
        /// Destination currency (e.g. USD)
        destination: String,
    },
    /// List all rates from one base currency
    Rates {
        /// Base currency
        #[arg(default_value = "EUR")]
        base: String,
    },
    /// Convert an amount between two currencies
    Convert {
        amount: f64,
        /// Base currency
        base: String,
        /// Destination currency
        destination: String,
    },
    /// List catalog products priced in a currency
    Products {
        /// Currency to price in; prices stay in EUR when omitted
        #[arg(long)]
        currency: Option<String>,
    },
    /// Check API health
    Health,
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse::<CurrencyCode>().map_err(|e| {
        let supported: Vec<&str> = CurrencyCode::all().iter().map(|c| c.code()).collect();
        anyhow::anyhow!("{}. Supported: {}", e, supported.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = RatesClient::new(&cli.api_url);
    if let Some(id) = cli.client_id {
        client = client.with_client_id(id);
    }

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Commands::Rate { base, destination } => {
            let resp = client.fetch_rate(&base, &destination).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Commands::Rates { base } => {
            let resp = client.list_rates(&base).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Commands::Convert {
            amount,
            base,
            destination,
        } => {
            let resp = client.fetch_rate(&base, &destination).await?;
            println!(
                "{:.4} {} = {:.4} {}",
                amount,
                base.to_uppercase(),
                amount * resp.rate,
                destination.to_uppercase()
            );
        }
        Commands::Products { currency } => {
            let currency = currency.as_deref().map(parse_currency).transpose()?;
            let catalog = ProductCatalog::new(client);
            let priced = catalog.list(currency).await;
            println!("{}", serde_json::to_string_pretty(&priced)?);
        }
    }

    Ok(())
}
