//! Admin view of placed orders.
//!
//! Item snapshots are frozen at placement; the admin only moves status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dessert_devs_core::{OrderId, OrderStatus, Price, UserId};

/// Geographic coordinates attached to a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One purchased line, frozen at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

/// A placed order as shown on the fulfillment dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub address: String,
    pub items: Vec<OrderItem>,
    pub total: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
}
