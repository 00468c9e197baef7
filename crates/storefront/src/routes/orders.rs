//! Order tracking route handlers.
//!
//! Orders belong to the caller asserted by the auth layer; another user's
//! order ID answers 404 rather than revealing it exists.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use dessert_devs_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::CallerId;
use crate::models::Order;
use crate::state::AppState;

/// Fetch an order and verify the caller owns it.
async fn owned_order(state: &AppState, caller: &CallerId, id: &OrderId) -> Result<Order> {
    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .filter(|order| order.user_id == caller.0)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(order)
}

/// The caller's order history, newest first.
pub async fn index(
    State(state): State<AppState>,
    caller: CallerId,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(&caller.0)
        .await?;

    Ok(Json(orders))
}

/// Order tracking detail.
pub async fn show(
    State(state): State<AppState>,
    caller: CallerId,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order = owned_order(&state, &caller, &OrderId::new(id)).await?;
    Ok(Json(order))
}

/// Cancel an order while it is still in the placed state.
///
/// The repository re-checks the status inside the UPDATE, so a cancel racing
/// an admin status advance loses cleanly and reports the conflict.
#[instrument(skip(state), fields(user_id = %caller.0, order_id = %id))]
pub async fn cancel(
    State(state): State<AppState>,
    caller: CallerId,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let id = OrderId::new(id);
    let mut order = owned_order(&state, &caller, &id).await?;

    if !order.status.is_cancellable() {
        return Err(AppError::Conflict(format!(
            "order {id} is {} and can no longer be cancelled",
            order.status
        )));
    }

    let cancelled = OrderRepository::new(state.pool()).cancel(&id).await?;
    if !cancelled {
        return Err(AppError::Conflict(format!(
            "order {id} can no longer be cancelled"
        )));
    }

    order.status = OrderStatus::Cancelled;
    Ok(Json(order))
}
