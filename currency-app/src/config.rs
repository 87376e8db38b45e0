//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use exchange_rates::ECB_DAILY_URL;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub feed_url: String,
    pub feed_timeout: Duration,
    /// `None` disables the background refresh.
    pub refresh_interval: Option<Duration>,
    pub requests_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, applying defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = parse_or(&lookup, "PORT", 9092)?;
        let feed_url = lookup("RATES_FEED_URL").unwrap_or_else(|| ECB_DAILY_URL.to_string());
        let feed_timeout = Duration::from_secs(parse_or(&lookup, "RATES_FEED_TIMEOUT_SECS", 10)?);
        let refresh_secs: u64 = parse_or(&lookup, "RATES_REFRESH_INTERVAL_SECS", 3600)?;
        let requests_per_minute = parse_or(&lookup, "RATES_REQUESTS_PER_MINUTE", 600)?;

        if feed_timeout.is_zero() {
            anyhow::bail!("RATES_FEED_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            port,
            feed_url,
            feed_timeout,
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            requests_per_minute,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value {raw:?} for {key}")),
        None => Ok(default),
    }
}
