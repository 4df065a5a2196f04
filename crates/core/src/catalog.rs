//! Menu catalog.
//!
//! The catalog is read-only reference data loaded once at startup. Carts
//! snapshot items out of it by value and never write back.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::MenuItemId;

/// Errors raised while assembling a [`Catalog`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two items share the same id.
    #[error("duplicate menu item id: {0}")]
    DuplicateId(MenuItemId),
    /// An item has a price below zero.
    #[error("menu item {id} has a negative price ({price})")]
    NegativePrice {
        /// Offending item.
        id: MenuItemId,
        /// The rejected price.
        price: Decimal,
    },
}

/// A purchasable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    /// Unit price in dollars.
    pub price: Decimal,
    /// Opaque image reference (path or URL).
    pub image: String,
    pub category: String,
    /// Components included with the dish, display only.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Optional add-ons and substitutions a guest may select.
    #[serde(default)]
    pub customizable_ingredients: Vec<String>,
}

impl MenuItem {
    /// Whether `customization` is one of this item's offered options.
    #[must_use]
    pub fn offers(&self, customization: &str) -> bool {
        self.customizable_ingredients
            .iter()
            .any(|option| option == customization)
    }

    /// Whether the item has any customization options at all.
    #[must_use]
    pub fn is_customizable(&self) -> bool {
        !self.customizable_ingredients.is_empty()
    }
}

/// The full menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog, checking id uniqueness and price sign.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two items share an id, or
    /// [`CatalogError::NegativePrice`] if any price is below zero.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: item.id.clone(),
                    price: item.price,
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// The restaurant's built-in menu.
    #[must_use]
    pub fn house_menu() -> Self {
        Self {
            items: vec![
                house_item(
                    "1",
                    "Caesar Salad",
                    "Fresh romaine lettuce with parmesan cheese, croutons, and our signature Caesar dressing",
                    1499,
                    "/static/images/caesar-salad.svg",
                    "Salads",
                    &["Romaine lettuce", "Parmesan cheese", "Croutons", "Caesar dressing"],
                    &["Grilled chicken", "Shrimp", "Anchovies", "Extra parmesan", "Extra croutons"],
                ),
                house_item(
                    "2",
                    "Classic Burger",
                    "Juicy beef patty with lettuce, tomato, cheese, and pickles on a sesame bun",
                    1899,
                    "/static/images/burger.svg",
                    "Mains",
                    &["Beef patty", "Sesame bun", "Lettuce", "Tomato", "Cheese", "Pickles"],
                    &["Bacon", "Avocado", "Onion rings", "Extra cheese", "No pickles", "No onions"],
                ),
                house_item(
                    "3",
                    "Street Tacos",
                    "Three corn tortillas filled with seasoned meat, onions, cilantro, and lime",
                    1699,
                    "/static/images/tacos.svg",
                    "Mains",
                    &["Corn tortillas", "Seasoned beef", "White onions", "Cilantro", "Lime"],
                    &[
                        "Chicken instead of beef",
                        "Fish instead of beef",
                        "Extra cilantro",
                        "Cheese",
                        "Sour cream",
                        "Guacamole",
                    ],
                ),
                house_item(
                    "4",
                    "Grilled Steak",
                    "Premium cut steak grilled to perfection, served with seasonal roasted vegetables",
                    2899,
                    "/static/images/steak.svg",
                    "Mains",
                    &["Premium steak", "Roasted vegetables", "Herb butter"],
                    &["Mashed potatoes", "French fries", "Side salad", "Mushrooms", "Peppercorn sauce"],
                ),
            ],
        }
    }

    /// All items in menu order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    /// Items whose category matches `category` (case-insensitive).
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.category.eq_ignore_ascii_case(category))
    }

    /// Number of items on the menu.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn house_item(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    image: &str,
    category: &str,
    ingredients: &[&str],
    customizable: &[&str],
) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(price_cents, 2),
        image: image.to_owned(),
        category: category.to_owned(),
        ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        customizable_ingredients: customizable.iter().map(|s| (*s).to_owned()).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_house_menu_has_four_items() {
        let catalog = Catalog::house_menu();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.find("1").unwrap().name, "Caesar Salad");
        assert_eq!(catalog.find("1").unwrap().price, Decimal::new(1499, 2));
        assert!(catalog.find("99").is_none());
    }

    #[test]
    fn test_house_menu_passes_validation() {
        let items = Catalog::house_menu().items().to_vec();
        assert!(Catalog::new(items).is_ok());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = Catalog::house_menu();
        assert_eq!(catalog.categories(), vec!["Salads", "Mains"]);
        assert_eq!(catalog.in_category("mains").count(), 3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let item = Catalog::house_menu().items()[0].clone();
        let err = Catalog::new(vec![item.clone(), item]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(MenuItemId::new("1")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut item = Catalog::house_menu().items()[0].clone();
        item.price = Decimal::new(-1, 2);
        assert!(matches!(
            Catalog::new(vec![item]),
            Err(CatalogError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_zero_price_allowed() {
        let mut item = Catalog::house_menu().items()[0].clone();
        item.price = Decimal::ZERO;
        assert!(Catalog::new(vec![item]).is_ok());
    }

    #[test]
    fn test_offers() {
        let catalog = Catalog::house_menu();
        let burger = catalog.find("2").unwrap();
        assert!(burger.offers("Bacon"));
        assert!(!burger.offers("Shrimp"));
        assert!(burger.is_customizable());
    }

    #[test]
    fn test_menu_item_deserializes_without_optional_lists() {
        let json = r#"{
            "id": "9",
            "name": "Soup",
            "description": "Of the day",
            "price": "6.50",
            "image": "soup.jpg",
            "category": "Starters"
        }"#;
        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::new(650, 2));
        assert!(item.ingredients.is_empty());
        assert!(!item.is_customizable());
    }
}
