//! Customization draft for a single menu item.
//!
//! Mirrors the customize dialog: the guest ticks options and picks a
//! quantity between 1 and [`MAX_DRAFT_QUANTITY`], then the draft is applied
//! to the cart one unit at a time so the cart's merge rule decides where
//! the units land.

use rust_decimal::Decimal;

use crate::cart::CartStore;
use crate::catalog::MenuItem;
use crate::types::LineId;

/// Largest quantity the dialog lets a guest pick in one go.
pub const MAX_DRAFT_QUANTITY: u32 = 10;

/// In-progress selection for one menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomizationDraft<'a> {
    item: &'a MenuItem,
    selected: Vec<String>,
    quantity: u32,
}

impl<'a> CustomizationDraft<'a> {
    /// Start a draft with nothing selected and quantity 1.
    #[must_use]
    pub const fn new(item: &'a MenuItem) -> Self {
        Self {
            item,
            selected: Vec::new(),
            quantity: 1,
        }
    }

    /// The item being customized.
    #[must_use]
    pub const fn item(&self) -> &'a MenuItem {
        self.item
    }

    /// Selected options, in the order they were ticked.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Currently chosen quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Tick or untick an option.
    ///
    /// Options the item does not offer are ignored. Returns whether the
    /// selection changed.
    pub fn toggle(&mut self, customization: &str, checked: bool) -> bool {
        if !self.item.offers(customization) {
            return false;
        }

        let position = self.selected.iter().position(|c| c == customization);
        match (checked, position) {
            (true, None) => {
                self.selected.push(customization.to_owned());
                true
            }
            (false, Some(index)) => {
                self.selected.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Raise the quantity by one, up to the cap.
    pub fn increment(&mut self) -> bool {
        self.set_quantity(self.quantity + 1)
    }

    /// Lower the quantity by one, down to 1.
    pub fn decrement(&mut self) -> bool {
        self.set_quantity(self.quantity.saturating_sub(1))
    }

    /// Set the quantity if it lies within `1..=MAX_DRAFT_QUANTITY`.
    ///
    /// Out-of-range values leave the draft unchanged and return `false`.
    pub fn set_quantity(&mut self, quantity: u32) -> bool {
        if (1..=MAX_DRAFT_QUANTITY).contains(&quantity) {
            self.quantity = quantity;
            true
        } else {
            false
        }
    }

    /// Unit price times the chosen quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }

    /// Add the draft to `cart`, one unit per chosen quantity.
    ///
    /// Returns the id of the row the units landed on.
    pub fn apply(self, cart: &mut CartStore) -> LineId {
        let mut line_id = cart.add_item(self.item, self.selected.iter().cloned());
        for _ in 1..self.quantity {
            line_id = cart.add_item(self.item, self.selected.iter().cloned());
        }
        line_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_new_draft_defaults() {
        let catalog = Catalog::house_menu();
        let draft = CustomizationDraft::new(catalog.find("2").unwrap());
        assert_eq!(draft.quantity(), 1);
        assert!(draft.selected().is_empty());
        assert_eq!(draft.line_total(), Decimal::from_str("18.99").unwrap());
    }

    #[test]
    fn test_toggle_keeps_selection_order_without_duplicates() {
        let catalog = Catalog::house_menu();
        let mut draft = CustomizationDraft::new(catalog.find("2").unwrap());

        assert!(draft.toggle("Bacon", true));
        assert!(draft.toggle("Avocado", true));
        assert!(!draft.toggle("Bacon", true));
        assert_eq!(draft.selected(), ["Bacon", "Avocado"]);

        assert!(draft.toggle("Bacon", false));
        assert!(!draft.toggle("Bacon", false));
        assert_eq!(draft.selected(), ["Avocado"]);
    }

    #[test]
    fn test_toggle_ignores_options_not_offered() {
        let catalog = Catalog::house_menu();
        let mut draft = CustomizationDraft::new(catalog.find("2").unwrap());
        assert!(!draft.toggle("Shrimp", true));
        assert!(draft.selected().is_empty());
    }

    #[test]
    fn test_quantity_stays_within_bounds() {
        let catalog = Catalog::house_menu();
        let mut draft = CustomizationDraft::new(catalog.find("1").unwrap());

        assert!(!draft.decrement());
        assert_eq!(draft.quantity(), 1);

        for _ in 0..20 {
            draft.increment();
        }
        assert_eq!(draft.quantity(), MAX_DRAFT_QUANTITY);
        assert!(!draft.increment());

        assert!(!draft.set_quantity(0));
        assert!(!draft.set_quantity(11));
        assert!(draft.set_quantity(4));
        assert_eq!(draft.quantity(), 4);
    }

    #[test]
    fn test_line_total_scales_with_quantity() {
        let catalog = Catalog::house_menu();
        let mut draft = CustomizationDraft::new(catalog.find("1").unwrap());
        draft.set_quantity(3);
        assert_eq!(draft.line_total(), Decimal::from_str("44.97").unwrap());
    }

    #[test]
    fn test_apply_accumulates_on_one_row() {
        let catalog = Catalog::house_menu();
        let mut cart = CartStore::new();
        let mut draft = CustomizationDraft::new(catalog.find("3").unwrap());
        draft.toggle("Guacamole", true);
        draft.set_quantity(3);

        let line_id = draft.apply(&mut cart);

        assert_eq!(cart.len(), 1);
        let line = cart.line(line_id).unwrap();
        assert_eq!(line.quantity(), 3);
        assert_eq!(line.customizations(), ["Guacamole"]);
    }

    #[test]
    fn test_apply_merges_with_existing_row() {
        let catalog = Catalog::house_menu();
        let taco = catalog.find("3").unwrap();
        let mut cart = CartStore::new();
        let existing = cart.add_item(taco, ["Cheese"]);

        let mut draft = CustomizationDraft::new(taco);
        draft.toggle("Cheese", true);
        draft.set_quantity(2);

        assert_eq!(draft.apply(&mut cart), existing);
        assert_eq!(cart.line(existing).unwrap().quantity(), 3);
    }
}
