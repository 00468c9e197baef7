//! Order repository.
//!
//! Item snapshots are stored as JSONB; the row layout mirrors the order
//! documents the mobile app already reads.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use dessert_devs_core::{OrderId, OrderStatus, Price, UserId};

use super::RepositoryError;
use crate::models::{Coordinates, Order, OrderItem};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    status: String,
    address: String,
    items: Json<Vec<OrderItem>>,
    total: rust_decimal::Decimal,
    lat: Option<f64>,
    lon: Option<f64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status).ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "unknown order status '{}' on order {}",
                row.status, row.id
            ))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            status,
            address: row.address,
            items: row.items.0,
            total: Price::new(row.total),
            coords: match (row.lat, row.lon) {
                (Some(latitude), Some(longitude)) => Some(Coordinates {
                    latitude,
                    longitude,
                }),
                _ => None,
            },
            created_at: row.created_at,
        })
    }
}

const ORDER_COLUMNS: &str =
    "id, user_id, status, address, items, total, lat, lon, created_at";

/// Repository for order storage and lifecycle.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a freshly placed order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO orders (id, user_id, status, address, items, total, lat, lon, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(order.id.as_str())
        .bind(order.user_id.as_str())
        .bind(order.status.as_str())
        .bind(&order.address)
        .bind(Json(&order.items))
        .bind(order.total.amount())
        .bind(order.coords.map(|c| c.latitude))
        .bind(order.coords.map(|c| c.longitude))
        .bind(order.created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The caller's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for unreadable stored statuses.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Fetch one order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
                .bind(id.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map(Order::try_from).transpose()
    }

    /// Cancel an order, but only while it is still in the placed state.
    ///
    /// Returns `true` if a row was updated. The status guard lives in the
    /// WHERE clause so two concurrent cancel taps can't both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn cancel(&self, id: &OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2 AND status = $3")
            .bind(OrderStatus::Cancelled.as_str())
            .bind(id.as_str())
            .bind(OrderStatus::Placed.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
