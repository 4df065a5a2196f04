//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Menu
//! GET  /                                - Menu grid (optional ?category=)
//! GET  /menu/{id}                       - Customize page for one item
//!
//! # Cart (HTMX fragments, redirect without HX-Request)
//! GET  /cart                            - Cart page
//! POST /cart/add                        - Add a customized item (item_id, customization*, quantity)
//! POST /cart/update                     - Set a line's quantity (line_id, quantity)
//! POST /cart/remove                     - Remove a line (line_id)
//! POST /cart/clear                      - Empty the cart
//! GET  /cart/count                      - Cart count badge (fragment)
//! GET  /api/cart                        - Priced cart as JSON
//!
//! # Checkout
//! GET  /checkout                        - Checkout form with order summary
//! POST /checkout                        - Submit and wait for the simulated payment
//! POST /checkout/cancel                 - Cancel the in-flight payment
//!
//! # Kitchen
//! GET  /kitchen/recipes/{id}            - Recipe with step progress
//! POST /kitchen/recipes/{id}/steps/{n}  - Toggle a step
//! ```

pub mod cart;
pub mod checkout;
pub mod kitchen;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/menu/{id}", get(menu::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::submit))
        .route("/cancel", post(checkout::cancel))
}

/// Create the kitchen routes router.
pub fn kitchen_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/{id}", get(kitchen::show))
        .route("/recipes/{id}/steps/{step}", post(kitchen::toggle_step))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(menu_routes())
        .nest("/cart", cart_routes())
        .route("/api/cart", get(cart::summary))
        .nest("/checkout", checkout_routes())
        .nest("/kitchen", kitchen_routes())
}
