//! Bistro Core - Menu, cart and checkout domain library.
//!
//! This crate provides the ordering logic shared by every Bistro component:
//! - `storefront` - Web front-end for browsing the menu and placing orders
//! - `cli` - Command-line tools for quoting and simulating orders
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no timers,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and levels
//! - [`catalog`] - Read-only menu items
//! - [`cart`] - Per-session cart with merge semantics
//! - [`pricing`] - Subtotal, tax and total derivation
//! - [`customize`] - Customization draft applied to a cart
//! - [`checkout`] - Checkout form and state machine
//! - [`recipe`] - Kitchen recipes and step progress

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customize;
pub mod pricing;
pub mod recipe;
pub mod types;

pub use cart::{CartStore, LineEntry};
pub use catalog::{Catalog, CatalogError, MenuItem};
pub use checkout::{
    CheckoutError, CheckoutField, CheckoutFlow, CheckoutForm, CheckoutPhase, DeliveryEstimate,
    OrderConfirmation, PendingOrder,
};
pub use customize::{CustomizationDraft, MAX_DRAFT_QUANTITY};
pub use pricing::{OrderSummary, TAX_RATE};
pub use recipe::{Recipe, RecipeBook, RecipeIngredient, RecipeProgress, RecipeStep};
pub use types::*;
