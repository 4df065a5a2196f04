//! Application state shared across handlers.

use std::sync::Arc;

use bistro_core::{Catalog, RecipeBook};

use crate::config::StorefrontConfig;
use crate::services::PaymentSimulator;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// menu, the recipe book, the payment simulator and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    recipes: RecipeBook,
    payments: PaymentSimulator,
}

impl AppState {
    /// Create state serving the house menu and recipes.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog(config, Catalog::house_menu(), RecipeBook::house())
    }

    /// Create state around an explicit catalog and recipe book.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog, recipes: RecipeBook) -> Self {
        let payments = PaymentSimulator::new(config.checkout_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                recipes,
                payments,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the kitchen recipes.
    #[must_use]
    pub fn recipes(&self) -> &RecipeBook {
        &self.inner.recipes
    }

    /// Get a reference to the simulated payment processor.
    #[must_use]
    pub fn payments(&self) -> &PaymentSimulator {
        &self.inner.payments
    }
}
