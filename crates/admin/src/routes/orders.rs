//! Fulfillment handlers.
//!
//! Status moves here are administrative; shopper-side cancellation (and its
//! placed-only guard) lives in the storefront.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use dessert_devs_core::{OrderId, OrderStatus};

use crate::db::OrderAdminRepository;
use crate::error::{AdminError, Result};
use crate::middleware::RequireApiToken;
use crate::models::Order;
use crate::state::AppState;

/// Request body for a status move.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// GET /orders - every order, newest first.
#[instrument(skip_all)]
pub async fn index(
    _auth: RequireApiToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderAdminRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// GET /orders/{id}.
#[instrument(skip_all, fields(order_id = %id))]
pub async fn show(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = OrderAdminRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}

/// POST /orders/{id}/status - move an order to a new status.
#[instrument(skip_all, fields(order_id = %id, status = %request.status))]
pub async fn set_status(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<Order>> {
    let repo = OrderAdminRepository::new(state.pool());

    let updated = repo.set_status(&id, request.status).await?;
    if !updated {
        return Err(AdminError::NotFound(format!("order {id}")));
    }

    let order = repo
        .get(&id)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("order {id}")))?;

    tracing::info!(order_id = %id, status = %order.status, "Order status updated");
    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_request_parses_kebab_case() {
        let request: SetStatusRequest =
            serde_json::from_str(r#"{"status":"on-the-way"}"#).expect("valid body");
        assert_eq!(request.status, OrderStatus::OnTheWay);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_str::<SetStatusRequest>(r#"{"status":"lost"}"#);
        assert!(result.is_err());
    }
}
