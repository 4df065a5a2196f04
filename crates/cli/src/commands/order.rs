//! Order files and quotes.
//!
//! An order file is a YAML list of lines:
//!
//! ```yaml
//! - item: "2"
//!   customizations: [Bacon, Extra cheese]
//!   quantity: 2
//! - item: "1"
//! ```
//!
//! Each line goes through a customization draft, so options an item does
//! not offer are dropped and quantities must be between 1 and 10.

use std::fmt::Write as _;
use std::path::Path;

use bistro_core::{CartStore, Catalog, CustomizationDraft, MAX_DRAFT_QUANTITY, OrderSummary};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading an order file.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("failed to read order file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid order file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("order file has no lines")]
    Empty,

    #[error("unknown menu item: {0}")]
    UnknownItem(String),

    #[error("quantity {quantity} for item {item} is outside 1..={max}", max = MAX_DRAFT_QUANTITY)]
    InvalidQuantity { item: String, quantity: u32 },
}

/// One line of an order file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderLine {
    /// Menu item id.
    pub item: String,
    #[serde(default)]
    pub customizations: Vec<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Parse order lines from YAML text.
///
/// # Errors
///
/// Returns `OrderError::Parse` for malformed YAML and `OrderError::Empty`
/// for an empty list.
pub fn parse_order(yaml: &str) -> Result<Vec<OrderLine>, OrderError> {
    let lines: Vec<OrderLine> = serde_yaml::from_str(yaml)?;
    if lines.is_empty() {
        return Err(OrderError::Empty);
    }
    Ok(lines)
}

/// Read and parse an order file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_order(path: &Path) -> Result<Vec<OrderLine>, OrderError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_order(&content)
}

/// Apply order lines to a fresh cart.
///
/// # Errors
///
/// Returns `OrderError::UnknownItem` or `OrderError::InvalidQuantity` for
/// the first offending line.
pub fn build_cart(catalog: &Catalog, lines: &[OrderLine]) -> Result<CartStore, OrderError> {
    let mut cart = CartStore::new();
    for line in lines {
        let item = catalog
            .find(&line.item)
            .ok_or_else(|| OrderError::UnknownItem(line.item.clone()))?;

        let mut draft = CustomizationDraft::new(item);
        for customization in &line.customizations {
            if item.offers(customization) {
                draft.toggle(customization, true);
            } else {
                tracing::warn!(
                    item = %item.id,
                    customization = %customization,
                    "ignoring customization not offered for this item"
                );
            }
        }
        if !draft.set_quantity(line.quantity) {
            return Err(OrderError::InvalidQuantity {
                item: line.item.clone(),
                quantity: line.quantity,
            });
        }
        draft.apply(&mut cart);
    }
    Ok(cart)
}

/// Render a priced receipt for a cart.
#[must_use]
pub fn render_receipt(summary: &OrderSummary) -> String {
    const WIDTH: usize = 48;
    let mut out = String::new();

    for line in &summary.items {
        let mut label = format!("{} x {}", line.quantity(), line.item().name);
        if !line.customizations().is_empty() {
            let _ = write!(label, " ({})", line.customizations().join(", "));
        }
        let price = bistro_core::Price::usd(line.line_total()).display();
        let _ = writeln!(out, "{label:<38}{price:>10}");
    }

    let _ = writeln!(out, "{}", "-".repeat(WIDTH));
    for (label, price) in [
        ("Subtotal", summary.subtotal_price()),
        ("Tax (10%)", summary.tax_price()),
        ("Total", summary.total_price()),
    ] {
        let _ = writeln!(out, "{label:<38}{:>10}", price.display());
    }
    out
}

/// Quote an order file: price it without placing it.
///
/// # Errors
///
/// Returns an error if the order file is unreadable or invalid.
pub async fn quote(catalog: &Catalog, path: &Path) -> Result<String, OrderError> {
    let lines = load_order(path).await?;
    let cart = build_cart(catalog, &lines)?;
    tracing::info!(lines = cart.len(), items = cart.total_item_count(), "order quoted");
    Ok(render_receipt(&cart.summary()))
}
