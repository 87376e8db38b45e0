//! Decoder for the ECB euro foreign exchange reference rates document.
//!
//! The document nests three levels of `Cube` elements:
//!
//! ```xml
//! <gesmes:Envelope ...>
//!   <Cube>
//!     <Cube time="2024-01-05">
//!       <Cube currency="USD" rate="1.0921"/>
//!       <Cube currency="JPY" rate="158.08"/>
//!     </Cube>
//!   </Cube>
//! </gesmes:Envelope>
//! ```
//!
//! All rates are quoted against EUR. When a document carries several days the
//! first (most recent) one is used.

use chrono::NaiveDate;
use currency_types::{RateError, RateTable};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Cube")]
    cube: Cubes,
}

#[derive(Debug, Deserialize)]
struct Cubes {
    #[serde(rename = "Cube", default)]
    days: Vec<DailyCube>,
}

#[derive(Debug, Deserialize)]
struct DailyCube {
    #[serde(rename = "@time", default)]
    time: Option<String>,
    #[serde(rename = "Cube", default)]
    entries: Vec<RateEntry>,
}

#[derive(Debug, Deserialize)]
struct RateEntry {
    #[serde(rename = "@currency")]
    currency: String,
    #[serde(rename = "@rate")]
    rate: String,
}

/// Decodes a reference-rate document into a [`RateTable`].
///
/// Returns [`RateError::FeedMalformed`] when the XML does not parse, when it
/// holds no rate entries, or when any entry has a bad currency code or a rate
/// that is not a number. Entries whose rate is zero or negative are dropped;
/// a document left with nothing but the reference currency is malformed.
pub fn decode(xml: &str) -> Result<RateTable, RateError> {
    let envelope: Envelope =
        quick_xml::de::from_str(xml).map_err(|e| RateError::FeedMalformed(e.to_string()))?;

    let day = envelope
        .cube
        .days
        .into_iter()
        .next()
        .filter(|day| !day.entries.is_empty())
        .ok_or_else(|| RateError::FeedMalformed("document contains no rate entries".into()))?;

    let published = day.time.as_deref().and_then(|time| {
        NaiveDate::parse_from_str(time.trim(), "%Y-%m-%d")
            .inspect_err(|e| warn!(time, error = %e, "Ignoring unparsable publication date"))
            .ok()
    });

    let entries = day
        .entries
        .iter()
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;

    for (currency, rate) in entries.iter().filter(|(_, rate)| *rate <= 0.0) {
        warn!(currency, rate, "Dropping non-positive rate");
    }

    let table = RateTable::new(entries, published);
    if table.len() <= 1 {
        return Err(RateError::FeedMalformed(
            "document contains no usable rates".into(),
        ));
    }

    debug!(currencies = table.len(), published = ?published, "Decoded rate feed");
    Ok(table)
}

fn parse_entry(entry: &RateEntry) -> Result<(String, f64), RateError> {
    let currency = entry.currency.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(RateError::FeedMalformed(format!(
            "invalid currency code {:?}",
            entry.currency
        )));
    }

    let rate = entry
        .rate
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite())
        .ok_or_else(|| {
            RateError::FeedMalformed(format!("invalid rate {:?} for {}", entry.rate, currency))
        })?;

    Ok((currency.to_uppercase(), rate))
}
