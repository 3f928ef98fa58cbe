//! Listing price in US dollars.
//!
//! Prices are stored as a non-negative [`Decimal`] so that `32.00` round-trips
//! exactly between the form, the backend's numeric column and the page.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input could not be parsed as a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a price typed into a form field (e.g. `"42"`, `"42.50"`, `"$42.50"`).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] or [`PriceError::Negative`].
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let cleaned = input.trim().trim_start_matches('$').trim();
        let amount: Decimal = cleaned.parse().map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The price before a percentage discount was applied.
    ///
    /// Listings store the sale price; the storefront shows the original
    /// struck through when a discount is present.
    #[must_use]
    pub fn before_discount(&self, discount_percent: u8) -> Self {
        if discount_percent == 0 || discount_percent >= 100 {
            return *self;
        }
        let remaining = Decimal::from(100 - u32::from(discount_percent)) / Decimal::from(100);
        Self((self.0 / remaining).round_dp(2))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(3200).to_string(), "$32.00");
        assert_eq!(Price::parse("7.5").unwrap().to_string(), "$7.50");
    }

    #[test]
    fn test_parse_form_input() {
        assert_eq!(Price::parse(" $42.50 ").unwrap(), Price::from_cents(4250));
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
        assert_eq!(Price::parse("abc"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("32.0").is_ok());
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_before_discount() {
        let sale = Price::from_cents(8000);
        assert_eq!(sale.before_discount(20), Price::from_cents(10000));
        assert_eq!(sale.before_discount(0), sale);
        assert_eq!(sale.before_discount(100), sale);
    }
}
