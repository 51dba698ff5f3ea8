//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price amount: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the default currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Parse a non-negative decimal amount such as `"59.99"`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Invalid`] if the input is not a decimal number and
    /// [`PriceError::Negative`] if it is below zero.
    pub fn parse_amount(s: &str) -> Result<Decimal, PriceError> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(amount)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = round_cents(self.amount);
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };
        f.pad(&format!(
            "{sign}{}{:.2}",
            self.currency_code.symbol(),
            amount.abs()
        ))
    }
}

/// Round a decimal amount to two places, midpoint away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::usd(Decimal::new(55, 0)).display(), "$55.00");
        assert_eq!(Price::usd(Decimal::new(5999, 2)).display(), "$59.99");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::usd(Decimal::new(4405, 3)).display(), "$4.41");
        assert_eq!(Price::usd(Decimal::new(-4405, 3)).display(), "-$4.41");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>8}", Price::usd(Decimal::ONE)), "   $1.00");
    }

    #[test]
    fn test_display_other_currency() {
        let price = Price::new(Decimal::new(1250, 2), CurrencyCode::GBP);
        assert_eq!(price.display(), "£12.50");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(Price::parse_amount("10").unwrap(), Decimal::new(10, 0));
        assert_eq!(Price::parse_amount(" 59.99 ").unwrap(), Decimal::new(5999, 2));
        assert_eq!(Price::parse_amount("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(matches!(
            Price::parse_amount("ten"),
            Err(PriceError::Invalid(_))
        ));
        assert!(matches!(
            Price::parse_amount("-1.50"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(CurrencyCode::default().code(), "USD");
        assert_eq!(CurrencyCode::EUR.symbol(), "€");
    }
}
