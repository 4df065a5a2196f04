//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are carried as exact [`Decimal`] values everywhere in the
//! domain. Rounding to cents only happens when a price is formatted for
//! display, so `29.98 * 1.10` stays `32.978` until it is shown as `$32.98`.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Number of decimal places shown when formatting.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Create a US dollar price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self {
            amount,
            currency_code: CurrencyCode::USD,
        }
    }

    /// The amount rounded to cents (midpoint away from zero).
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.rounded())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency code. The menu is priced in US dollars only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Price::usd(dec("32.978")).display(), "$32.98");
        assert_eq!(Price::usd(dec("2.998")).display(), "$3.00");
    }

    #[test]
    fn test_display_pads_whole_amounts() {
        assert_eq!(Price::usd(dec("20")).display(), "$20.00");
        assert_eq!(Price::usd(Decimal::ZERO).to_string(), "$0.00");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(Price::usd(dec("1.005")).rounded(), dec("1.01"));
    }

    #[test]
    fn test_amount_serializes_as_string() {
        let json = serde_json::to_value(Price::usd(dec("14.99"))).unwrap();
        assert_eq!(json["amount"], "14.99");
        assert_eq!(json["currency_code"], "USD");
    }
}
