//! Checkout route handlers: location -> order summary -> payment.
//!
//! Payment processing itself is an external concern; `pay` records the
//! chosen method, snapshots the cart into an order, and clears the cart.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use dessert_devs_core::{OrderId, OrderStatus, Price};

use super::cart::{CartView, load_cart, save_cart};
use crate::db::{OrderRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::CallerId;
use crate::models::{DeliveryAddress, Order, OrderItem};
use crate::state::AppState;

/// Order summary response: saved address plus current cart totals.
#[derive(Debug, Serialize)]
pub struct CheckoutSummary {
    pub address: Option<DeliveryAddress>,
    pub cart: CartView,
}

/// Payment request body. The method is recorded for telemetry only; payment
/// UI and processing live outside this service.
#[derive(Debug, Deserialize, Default)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Save the caller's delivery address (manual entry or reverse-geocoded GPS
/// fix, with optional raw coordinates).
#[instrument(skip(state, delivery), fields(user_id = %caller.0))]
pub async fn save_location(
    State(state): State<AppState>,
    caller: CallerId,
    Json(delivery): Json<DeliveryAddress>,
) -> Result<StatusCode> {
    if delivery.address.trim().is_empty() {
        return Err(AppError::BadRequest("address must not be empty".to_owned()));
    }

    UserRepository::new(state.pool())
        .upsert_address(&caller.0, &delivery)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The order summary screen: address on file plus the cart as it stands.
pub async fn summary(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    session: Session,
) -> Result<Json<CheckoutSummary>> {
    let address = UserRepository::new(state.pool())
        .get_address(&user_id)
        .await?;
    let cart = load_cart(&session).await?;

    Ok(Json(CheckoutSummary {
        address,
        cart: CartView::from(&cart),
    }))
}

/// Place the order.
///
/// Requires a non-empty cart and a saved delivery address. Items are frozen
/// as name/price/quantity snapshots; the cart (and its discount) is cleared
/// only after the insert succeeds.
#[instrument(skip(state, session, request), fields(user_id = %caller.0))]
pub async fn pay(
    State(state): State<AppState>,
    caller: CallerId,
    session: Session,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let CallerId(user_id) = caller;

    let mut cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_owned()));
    }

    let delivery = UserRepository::new(state.pool())
        .get_address(&user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("no delivery address on file".to_owned()))?;

    if let Some(method) = &request.payment_method {
        tracing::info!(payment_method = %method, "payment method selected");
    }

    let items: Vec<OrderItem> = cart
        .lines()
        .iter()
        .map(|line| OrderItem {
            name: line.name.clone(),
            price: line.unit_price,
            quantity: line.quantity,
        })
        .collect();

    let order = Order {
        id: OrderId::new(Uuid::new_v4().to_string()),
        user_id,
        status: OrderStatus::Placed,
        address: delivery.address,
        items,
        total: Price::new(cart.total_after_discount()),
        coords: delivery.coords,
        created_at: Utc::now(),
    };

    OrderRepository::new(state.pool()).create(&order).await?;

    cart.clear();
    save_cart(&session, &cart).await?;

    Ok((StatusCode::CREATED, Json(order)))
}
