//! Print the menu.

use std::fmt::Write as _;

use bistro_core::{Catalog, MenuItem, Price};

/// Render the menu, optionally limited to one category.
///
/// With `json`, emits the selected items as a JSON array instead of text.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(
    catalog: &Catalog,
    category: Option<&str>,
    json: bool,
) -> Result<String, serde_json::Error> {
    let items: Vec<&MenuItem> = match category {
        Some(category) => catalog.in_category(category).collect(),
        None => catalog.items().iter().collect(),
    };

    if json {
        return serde_json::to_string_pretty(&items);
    }

    let mut out = String::new();
    if items.is_empty() {
        out.push_str("No items in this category.\n");
        return Ok(out);
    }

    for group in catalog.categories() {
        let in_group: Vec<&&MenuItem> = items.iter().filter(|item| item.category == group).collect();
        if in_group.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{group}");
        for item in in_group {
            let _ = writeln!(
                out,
                "  [{}] {:<28}{:>10}",
                item.id,
                item.name,
                Price::usd(item.price).display()
            );
            if item.is_customizable() {
                let _ = writeln!(out, "      options: {}", item.customizable_ingredients.join(", "));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_menu_groups_by_category() {
        let text = render(&Catalog::house_menu(), None, false).unwrap();
        let salads = text.find("Salads").unwrap();
        let mains = text.find("Mains").unwrap();
        assert!(salads < mains);
        assert!(text.contains("[1] Caesar Salad"));
        assert!(text.contains("$28.99"));
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let text = render(&Catalog::house_menu(), Some("salads"), false).unwrap();
        assert!(text.contains("Caesar Salad"));
        assert!(!text.contains("Classic Burger"));
    }

    #[test]
    fn test_unknown_category() {
        let text = render(&Catalog::house_menu(), Some("Desserts"), false).unwrap();
        assert_eq!(text, "No items in this category.\n");
    }

    #[test]
    fn test_json_menu_keeps_prices_as_strings() {
        let json = render(&Catalog::house_menu(), Some("Mains"), true).unwrap();
        let items: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(items.as_array().unwrap().len(), 3);
        assert_eq!(items[0]["price"], "18.99");
    }
}
