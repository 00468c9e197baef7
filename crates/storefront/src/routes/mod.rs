//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Products
//! GET  /products               - Catalog listing with filter query params
//! GET  /products/{id}          - Product detail
//!
//! # Cart (session-scoped)
//! GET  /cart                   - Current cart with totals
//! POST /cart/add               - Merge-add a line
//! POST /cart/update            - Overwrite a line quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/discount          - Apply a promo code
//! GET  /cart/count             - Cart badge count
//!
//! # Checkout (requires x-user-id)
//! PUT  /checkout/location      - Save delivery address
//! GET  /checkout/summary       - Address + cart totals
//! POST /checkout/pay           - Place the order, clear the cart
//!
//! # Orders (requires x-user-id)
//! GET  /orders                 - Caller's orders, newest first
//! GET  /orders/{id}            - Order tracking detail
//! POST /orders/{id}/cancel     - Cancel while still placed
//!
//! # Pickup branches
//! GET  /branches               - Configured branch list
//! GET  /branches/closest       - Nearest branch for ?lat=&lon=
//! ```

pub mod branches;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/discount", post(cart::apply_discount))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/location", put(checkout::save_location))
        .route("/summary", get(checkout::summary))
        .route("/pay", post(checkout::pay))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/cancel", post(orders::cancel))
}

/// Create the branch routes router.
pub fn branch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(branches::index))
        .route("/closest", get(branches::closest))
}

/// Create the complete storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/orders", order_routes())
        .nest("/branches", branch_routes())
}
