//! Reference-relative rate table and cross-rate arithmetic.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::currency::REFERENCE_CURRENCY;
use crate::error::RateError;

/// One snapshot of currency → rate-against-the-reference-currency.
///
/// A table is immutable once built. Refreshing the cache builds a new table
/// and swaps it in whole.
///
/// Invariants:
/// - the reference currency maps to exactly `1.0`
/// - every stored rate is finite and strictly positive
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
    published: Option<NaiveDate>,
    fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Builds a table from feed entries.
    ///
    /// Codes are upper-cased. Non-positive and non-finite rates are dropped as
    /// absent data. The reference currency is forced to `1.0` whatever the
    /// entries say about it.
    pub fn new<I, S>(entries: I, published: Option<NaiveDate>) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut rates: HashMap<String, f64> = entries
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .map(|(code, rate)| (code.as_ref().trim().to_uppercase(), rate))
            .collect();
        rates.insert(REFERENCE_CURRENCY.code().to_string(), 1.0);

        Self {
            rates,
            published,
            fetched_at: Utc::now(),
        }
    }

    /// Rate of `code` against the reference currency.
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Factor such that `amount_in_destination = amount_in_base * factor`.
    ///
    /// Both codes must be present. Identical codes yield exactly `1.0`.
    pub fn cross_rate(&self, base: &str, destination: &str) -> Result<f64, RateError> {
        let base_rate = self.lookup(base)?;
        let destination_rate = self.lookup(destination)?;

        if base == destination {
            return Ok(1.0);
        }

        Ok(destination_rate / base_rate)
    }

    /// Iterates over the codes in the table, in no particular order.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Never true in practice: `new` inserts the reference currency into every table.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Publication date reported by the feed, if any.
    pub fn published(&self) -> Option<NaiveDate> {
        self.published
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    fn lookup(&self, code: &str) -> Result<f64, RateError> {
        self.get(code)
            .ok_or_else(|| RateError::UnknownCurrency(code.to_string()))
    }
}
