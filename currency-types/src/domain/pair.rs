//! Currency pair value object.

use std::fmt;

use super::currency::{CurrencyCode, UnsupportedCurrency};

/// A (base, destination) query. Passed into lookups, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub destination: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, destination: CurrencyCode) -> Self {
        Self { base, destination }
    }

    /// Parses both codes, reporting the first one outside the supported set.
    pub fn parse(base: &str, destination: &str) -> Result<Self, UnsupportedCurrency> {
        Ok(Self {
            base: base.parse()?,
            destination: destination.parse()?,
        })
    }

    pub fn is_identity(&self) -> bool {
        self.base == self.destination
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.destination)
    }
}
