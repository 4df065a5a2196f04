//! Order pricing.
//!
//! Totals are derived on every read from the cart's current rows and are
//! never cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::LineEntry;
use crate::types::Price;

/// Flat sales tax applied to every order (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Subtotal, tax and total for a set of cart rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub items: Vec<LineEntry>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Price the given rows.
    #[must_use]
    pub fn from_lines(lines: &[LineEntry]) -> Self {
        let subtotal: Decimal = lines.iter().map(LineEntry::line_total).sum();
        let tax = subtotal * TAX_RATE;
        Self {
            items: lines.to_vec(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Sum of quantities across the priced rows.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Whether there is nothing to pay for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal as a displayable US dollar price.
    #[must_use]
    pub const fn subtotal_price(&self) -> Price {
        Price::usd(self.subtotal)
    }

    /// Tax as a displayable US dollar price.
    #[must_use]
    pub const fn tax_price(&self) -> Price {
        Price::usd(self.tax)
    }

    /// Total as a displayable US dollar price.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::usd(self.total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::cart::CartStore;
    use crate::catalog::Catalog;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_tax_rate_is_ten_percent() {
        assert_eq!(TAX_RATE, dec("0.10"));
    }

    #[test]
    fn test_summary_for_two_caesar_salads() {
        let catalog = Catalog::house_menu();
        let salad = catalog.find("1").unwrap();
        let mut cart = CartStore::new();
        cart.add_item(salad, Vec::<String>::new());
        cart.add_item(salad, Vec::<String>::new());

        let summary = cart.summary();
        assert_eq!(summary.subtotal, dec("29.98"));
        assert_eq!(summary.tax, dec("2.998"));
        assert_eq!(summary.total, dec("32.978"));
        assert_eq!(summary.total_price().display(), "$32.98");
        assert_eq!(summary.item_count(), 2);
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = OrderSummary::from_lines(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.subtotal, Decimal::ZERO);
        assert_eq!(summary.tax, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn test_summary_tracks_cart_changes() {
        let catalog = Catalog::house_menu();
        let mut cart = CartStore::new();
        let line = cart.add_item(catalog.find("4").unwrap(), ["Mushrooms"]);
        assert_eq!(cart.summary().subtotal, dec("28.99"));

        cart.update_line_quantity(line, 3);
        assert_eq!(cart.summary().subtotal, dec("86.97"));

        cart.clear();
        assert_eq!(cart.summary().total, Decimal::ZERO);
    }
}
