//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as JSON numbers (`19.99`) both on the wire and in the
//! stored cart, but are held as [`Decimal`] so that formatting never shows
//! binary floating point artifacts.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A price in the store's single currency (US dollars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    ///
    /// ```
    /// use shopnow_core::Price;
    ///
    /// assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }
}

/// Formats as `$` followed by the amount rounded half away from zero to two
/// places.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${cents:.2}")
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| PriceError::Invalid(s.to_string()))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::from_cents(999).to_string(), "$9.99");
        assert_eq!(Price::from_cents(2000).to_string(), "$20.00");
        assert_eq!("5".parse::<Price>().unwrap().to_string(), "$5.00");
    }

    #[test]
    fn test_display_rounds_extra_places() {
        assert_eq!("24.999".parse::<Price>().unwrap().to_string(), "$25.00");
        assert_eq!("0.005".parse::<Price>().unwrap().to_string(), "$0.01");
        assert_eq!("19.994".parse::<Price>().unwrap().to_string(), "$19.99");

        let wire: Price = serde_json::from_str("24.999").unwrap();
        assert_eq!(wire.to_string(), "$25.00");
    }

    #[test]
    fn test_parse_accepts_dollar_sign() {
        assert_eq!("$19.99".parse::<Price>().unwrap(), Price::from_cents(1999));
        assert!("nineteen".parse::<Price>().is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_cents(1999)).unwrap();
        assert_eq!(json, "19.99");
    }

    #[test]
    fn test_deserializes_from_number() {
        let price: Price = serde_json::from_str("29.99").unwrap();
        assert_eq!(price, Price::from_cents(2999));

        let whole: Price = serde_json::from_str("10").unwrap();
        assert_eq!(whole.to_string(), "$10.00");
    }
}
