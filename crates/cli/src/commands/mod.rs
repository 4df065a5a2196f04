//! CLI command implementations.
//!
//! Commands return their output as text; `main` decides where it goes.

pub mod checkout;
pub mod menu;
pub mod order;
pub mod recipe;
