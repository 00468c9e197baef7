//! Admin HTTP routes.
//!
//! Route table (all behind the bearer token):
//! - `GET    /products`           full catalog for the dashboard
//! - `POST   /products`           create a product
//! - `PUT    /products/{id}`      update a product
//! - `DELETE /products/{id}`      delete a product
//! - `GET    /orders`             all orders, newest first
//! - `GET    /orders/{id}`        one order
//! - `POST   /orders/{id}/status` move an order to a new status

pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::remove),
        )
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::set_status))
}
