//! Supported currencies.
//!
//! The service only answers queries for a closed set of currencies known at
//! compile time. Currencies are declared once in the `define_currencies!`
//! invocation below, which generates the `CurrencyCode` enum along with its
//! lookup, parsing, and display impls.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     ARS => ("ARS", "$"),
//! }
//! ```

use std::fmt;

/// The currency every cached rate is quoted against.
pub const REFERENCE_CURRENCY: CurrencyCode = CurrencyCode::EUR;

/// A code outside the supported enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency: {0}")]
pub struct UnsupportedCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its runtime dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Defines the supported currency set.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "SYMBOL"),
/// }
/// ```
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal)
        ),* $(,)?
    ) => {
        /// A three-letter currency code from the supported set.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = UnsupportedCurrency;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(UnsupportedCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - the ECB reference set
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    EUR => ("EUR", "€"),
    USD => ("USD", "$"),
    JPY => ("JPY", "¥"),
    BGN => ("BGN", "лв"),
    CZK => ("CZK", "Kč"),
    DKK => ("DKK", "kr"),
    GBP => ("GBP", "£"),
    HUF => ("HUF", "Ft"),
    PLN => ("PLN", "zł"),
    RON => ("RON", "lei"),
    SEK => ("SEK", "kr"),
    CHF => ("CHF", "Fr"),
    ISK => ("ISK", "kr"),
    NOK => ("NOK", "kr"),
    TRY => ("TRY", "₺"),
    AUD => ("AUD", "$"),
    BRL => ("BRL", "R$"),
    CAD => ("CAD", "$"),
    CNY => ("CNY", "¥"),
    HKD => ("HKD", "$"),
    IDR => ("IDR", "Rp"),
    ILS => ("ILS", "₪"),
    INR => ("INR", "₹"),
    KRW => ("KRW", "₩"),
    MXN => ("MXN", "$"),
    MYR => ("MYR", "RM"),
    NZD => ("NZD", "$"),
    PHP => ("PHP", "₱"),
    SGD => ("SGD", "$"),
    THB => ("THB", "฿"),
    ZAR => ("ZAR", "R"),
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
