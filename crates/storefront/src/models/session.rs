//! Session-related types.
//!
//! Each browser session owns one cart, one checkout flow and the step
//! progress for any recipe it has opened. Values are stored as JSON in the
//! session record and read back on every request.

use bistro_core::{CartStore, CheckoutFlow, RecipeProgress};
use tower_sessions::Session;

/// Session keys for ordering state.
pub mod keys {
    /// Key for the session's cart.
    pub const CART: &str = "cart";

    /// Key for the session's checkout state machine.
    pub const CHECKOUT: &str = "checkout";

    /// Prefix for per-recipe step progress (`recipe_progress:<id>`).
    pub const RECIPE_PROGRESS_PREFIX: &str = "recipe_progress:";
}

/// Load the session's cart, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value no
/// longer deserializes.
pub async fn load_cart(session: &Session) -> Result<CartStore, tower_sessions::session::Error> {
    Ok(session
        .get::<CartStore>(keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the session's cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(
    session: &Session,
    cart: &CartStore,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Load the session's checkout flow, or an idle one.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_checkout(
    session: &Session,
) -> Result<CheckoutFlow, tower_sessions::session::Error> {
    Ok(session
        .get::<CheckoutFlow>(keys::CHECKOUT)
        .await?
        .unwrap_or_default())
}

/// Persist the session's checkout flow.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_checkout(
    session: &Session,
    flow: &CheckoutFlow,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CHECKOUT, flow).await
}

fn recipe_key(recipe_id: &str) -> String {
    format!("{}{recipe_id}", keys::RECIPE_PROGRESS_PREFIX)
}

/// Load step progress for one recipe.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_recipe_progress(
    session: &Session,
    recipe_id: &str,
) -> Result<RecipeProgress, tower_sessions::session::Error> {
    Ok(session
        .get::<RecipeProgress>(&recipe_key(recipe_id))
        .await?
        .unwrap_or_default())
}

/// Persist step progress for one recipe.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_recipe_progress(
    session: &Session,
    recipe_id: &str,
    progress: &RecipeProgress,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(&recipe_key(recipe_id), progress).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use bistro_core::Catalog;
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_missing_cart_loads_empty() {
        let session = session();
        assert!(load_cart(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_roundtrips_through_session() {
        let session = session();
        let catalog = Catalog::house_menu();
        let mut cart = CartStore::new();
        cart.add_item(catalog.find("2").unwrap(), ["Bacon"]);
        save_cart(&session, &cart).await.unwrap();

        assert_eq!(load_cart(&session).await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_recipe_progress_is_keyed_per_recipe() {
        let session = session();
        let mut progress = RecipeProgress::new();
        progress.toggle(3);
        save_recipe_progress(&session, "caesar-salad", &progress)
            .await
            .unwrap();

        let loaded = load_recipe_progress(&session, "caesar-salad").await.unwrap();
        assert!(loaded.is_completed(3));
        let other = load_recipe_progress(&session, "tacos").await.unwrap();
        assert_eq!(other.completed_count(), 0);
    }
}
