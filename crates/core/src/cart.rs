//! Session cart.
//!
//! A [`CartStore`] owns the line entries for one ordering session. Each
//! entry is a by-value snapshot of a [`MenuItem`] plus the guest's
//! customization selection and a quantity that is always at least 1.
//!
//! Two additions land on the same entry when the catalog id matches and the
//! customization selections are equal as sets; order of selection does not
//! matter. Every entry also gets a generated [`LineId`] so a single row can
//! be updated or removed without touching differently-customized rows of
//! the same dish.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;
use crate::pricing::OrderSummary;
use crate::types::{LineId, MenuItemId};

/// One row in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEntry {
    line_id: LineId,
    item: MenuItem,
    quantity: u32,
    customizations: Vec<String>,
}

impl LineEntry {
    /// Generated identifier of this row.
    #[must_use]
    pub const fn line_id(&self) -> LineId {
        self.line_id
    }

    /// Snapshot of the catalog item taken when the row was created.
    #[must_use]
    pub const fn item(&self) -> &MenuItem {
        &self.item
    }

    /// Catalog id of the snapshotted item.
    #[must_use]
    pub const fn item_id(&self) -> &MenuItemId {
        &self.item.id
    }

    /// Quantity, never below 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Selected customizations in the order they were chosen.
    #[must_use]
    pub fn customizations(&self) -> &[String] {
        &self.customizations
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }

    /// Whether an addition of `item_id` with `customizations` merges into this row.
    #[must_use]
    pub fn matches(&self, item_id: &MenuItemId, customizations: &[String]) -> bool {
        self.item.id == *item_id && same_selection(&self.customizations, customizations)
    }
}

/// Set equality over customization lists.
fn same_selection(a: &[String], b: &[String]) -> bool {
    let a: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

/// Saturating conversion of a requested quantity that is known to be positive.
fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity).unwrap_or(u32::MAX)
}

/// The line entries of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    lines: Vec<LineEntry>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `item` with the given customization selection.
    ///
    /// If a row with the same item id and the same set of customizations
    /// exists, its quantity goes up by exactly one; otherwise a new row with
    /// quantity 1 is appended. Returns the id of the affected row.
    pub fn add_item<I, S>(&mut self, item: &MenuItem, customizations: I) -> LineId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let customizations: Vec<String> = customizations.into_iter().map(Into::into).collect();

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&item.id, &customizations))
        {
            line.quantity = line.quantity.saturating_add(1);
            return line.line_id;
        }

        let line_id = LineId::generate();
        self.lines.push(LineEntry {
            line_id,
            item: item.clone(),
            quantity: 1,
            customizations,
        });
        line_id
    }

    /// Remove every row whose catalog id is `item_id`.
    ///
    /// Differently-customized rows of the same dish all go. Returns how many
    /// rows were removed; an unknown id removes nothing.
    pub fn remove_item(&mut self, item_id: &MenuItemId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.item.id != *item_id);
        before - self.lines.len()
    }

    /// Set the quantity of every row whose catalog id is `item_id`.
    ///
    /// A quantity of zero or less behaves as [`remove_item`](Self::remove_item).
    /// Returns how many rows were affected.
    pub fn update_quantity(&mut self, item_id: &MenuItemId, quantity: i64) -> usize {
        if quantity <= 0 {
            return self.remove_item(item_id);
        }

        let quantity = clamp_quantity(quantity);
        let mut updated = 0;
        for line in self.lines.iter_mut().filter(|line| line.item.id == *item_id) {
            line.quantity = quantity;
            updated += 1;
        }
        updated
    }

    /// Remove exactly the row identified by `line_id`.
    pub fn remove_line(&mut self, line_id: LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.line_id != line_id);
        before != self.lines.len()
    }

    /// Set the quantity of the row identified by `line_id`.
    ///
    /// A quantity of zero or less removes the row. Returns whether a row was
    /// found.
    pub fn update_line_quantity(&mut self, line_id: LineId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }

        match self.lines.iter_mut().find(|line| line.line_id == line_id) {
            Some(line) => {
                line.quantity = clamp_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all rows.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity across all rows, before tax.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(LineEntry::line_total).sum()
    }

    /// Current rows in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineEntry] {
        &self.lines
    }

    /// Look up a row by id.
    #[must_use]
    pub fn line(&self, line_id: LineId) -> Option<&LineEntry> {
        self.lines.iter().find(|line| line.line_id == line_id)
    }

    /// Number of distinct rows (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Derive subtotal, tax and total from the current rows.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_lines(&self.lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const NONE: [&str; 0] = [];

    fn item(id: &str, price: &str) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            name: format!("Item {id}"),
            description: String::new(),
            price: Decimal::from_str(price).unwrap(),
            image: String::new(),
            category: "Mains".to_owned(),
            ingredients: Vec::new(),
            customizable_ingredients: vec!["X".to_owned(), "Y".to_owned()],
        }
    }

    #[test]
    fn test_identical_additions_merge() {
        let mut cart = CartStore::new();
        let salad = item("1", "14.99");

        let first = cart.add_item(&salad, ["X"]);
        let second = cart.add_item(&salad, ["X"]);

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
    }

    #[test]
    fn test_different_customizations_coexist() {
        let mut cart = CartStore::new();
        let salad = item("1", "14.99");

        cart.add_item(&salad, ["X"]);
        cart.add_item(&salad, ["Y"]);

        assert_eq!(cart.len(), 2);
        assert!(cart.lines().iter().all(|line| line.quantity() == 1));
    }

    #[test]
    fn test_selection_order_does_not_matter() {
        let mut cart = CartStore::new();
        let salad = item("1", "14.99");

        cart.add_item(&salad, ["X", "Y"]);
        cart.add_item(&salad, ["Y", "X"]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
        assert_eq!(cart.lines()[0].customizations(), ["X", "Y"]);
    }

    #[test]
    fn test_subset_selection_does_not_merge() {
        let mut cart = CartStore::new();
        let salad = item("1", "14.99");

        cart.add_item(&salad, ["X", "Y"]);
        cart.add_item(&salad, ["X"]);
        cart.add_item(&salad, NONE);

        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = CartStore::new();
        let a = item("1", "10.00");
        let b = item("2", "5.00");
        cart.add_item(&a, NONE);
        cart.add_item(&b, NONE);

        assert_eq!(cart.update_quantity(&a.id, 0), 1);
        assert!(cart.lines().iter().all(|line| line.item_id() != &a.id));

        assert_eq!(cart.update_quantity(&b.id, -1), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_is_absolute_and_hits_every_variant() {
        let mut cart = CartStore::new();
        let a = item("1", "10.00");
        cart.add_item(&a, ["X"]);
        cart.add_item(&a, ["X"]);
        cart.add_item(&a, NONE);

        assert_eq!(cart.update_quantity(&a.id, 5), 2);
        assert!(cart.lines().iter().all(|line| line.quantity() == 5));
    }

    #[test]
    fn test_remove_item_removes_all_variants() {
        let mut cart = CartStore::new();
        let a = item("1", "10.00");
        let b = item("2", "5.00");
        cart.add_item(&a, ["X"]);
        cart.add_item(&a, NONE);
        cart.add_item(&b, NONE);

        assert_eq!(cart.remove_item(&a.id), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.remove_item(&MenuItemId::new("missing")), 0);
    }

    #[test]
    fn test_line_operations_touch_only_one_row() {
        let mut cart = CartStore::new();
        let a = item("1", "10.00");
        let plain = cart.add_item(&a, NONE);
        let custom = cart.add_item(&a, ["X"]);

        assert!(cart.update_line_quantity(custom, 4));
        assert_eq!(cart.line(custom).unwrap().quantity(), 4);
        assert_eq!(cart.line(plain).unwrap().quantity(), 1);

        assert!(cart.remove_line(plain));
        assert!(cart.line(plain).is_none());
        assert!(cart.line(custom).is_some());

        assert!(cart.update_line_quantity(custom, 0));
        assert!(cart.is_empty());
        assert!(!cart.remove_line(custom));
        assert!(!cart.update_line_quantity(custom, 3));
    }

    #[test]
    fn test_total_item_count_sums_quantities() {
        let mut cart = CartStore::new();
        let a = item("1", "10.00");
        let b = item("2", "5.00");
        let first = cart.add_item(&a, NONE);
        let second = cart.add_item(&b, NONE);
        cart.update_line_quantity(first, 2);
        cart.update_line_quantity(second, 3);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_total_price() {
        let mut cart = CartStore::new();
        let salad = item("1", "14.99");
        cart.add_item(&salad, NONE);
        cart.add_item(&salad, NONE);

        assert_eq!(cart.total_price(), Decimal::from_str("29.98").unwrap());
    }

    #[test]
    fn test_clear_zeroes_queries() {
        let mut cart = CartStore::new();
        cart.add_item(&item("1", "14.99"), ["X"]);
        cart.add_item(&item("2", "3.50"), NONE);

        cart.clear();

        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_entry_is_a_snapshot() {
        let mut cart = CartStore::new();
        let mut salad = item("1", "14.99");
        let line = cart.add_item(&salad, NONE);

        salad.price = Decimal::from_str("99.00").unwrap();
        salad.name = "Renamed".to_owned();

        let entry = cart.line(line).unwrap();
        assert_eq!(entry.item().price, Decimal::from_str("14.99").unwrap());
        assert_eq!(entry.item().name, "Item 1");
    }

    #[test]
    fn test_merging_uses_catalog_id_not_snapshot_fields() {
        let mut cart = CartStore::new();
        let salad = item("1", "14.99");
        cart.add_item(&salad, NONE);

        let mut repriced = salad.clone();
        repriced.price = Decimal::from_str("1.00").unwrap();
        cart.add_item(&repriced, NONE);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), Decimal::from_str("29.98").unwrap());
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut cart = CartStore::new();
        let line = cart.add_item(&item("1", "1.00"), NONE);
        cart.update_line_quantity(line, i64::MAX);
        assert_eq!(cart.line(line).unwrap().quantity(), u32::MAX);
    }

    #[test]
    fn test_end_to_end_merge_and_totals() {
        let mut cart = CartStore::new();
        let a = item("A", "10.00");

        cart.add_item(&a, ["X"]);
        cart.add_item(&a, ["X"]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 2);
        assert_eq!(cart.total_price(), Decimal::from_str("20.00").unwrap());

        cart.add_item(&a, NONE);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[1].quantity(), 1);
        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price(), Decimal::from_str("30.00").unwrap());
    }

    #[test]
    fn test_cart_survives_serialization() {
        let mut cart = CartStore::new();
        cart.add_item(&item("1", "14.99"), ["X"]);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: CartStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
