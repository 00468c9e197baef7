//! User repository: delivery address storage.
//!
//! The storefront does not own authentication; it is handed an opaque user
//! ID by the mobile app's auth layer and keeps only the delivery data the
//! checkout flow needs.

use sqlx::PgPool;

use dessert_devs_core::UserId;

use super::RepositoryError;
use crate::models::{Coordinates, DeliveryAddress};

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    address: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Repository for user delivery data.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Save (or replace) the caller's delivery address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_address(
        &self,
        user_id: &UserId,
        delivery: &DeliveryAddress,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, address, lat, lon, updated_at)
             VALUES ($1, $2, $3, $4, NOW())
             ON CONFLICT (id)
             DO UPDATE SET address = $2, lat = $3, lon = $4, updated_at = NOW()",
        )
        .bind(user_id.as_str())
        .bind(&delivery.address)
        .bind(delivery.coords.map(|c| c.latitude))
        .bind(delivery.coords.map(|c| c.longitude))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Fetch the caller's saved delivery address, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_address(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DeliveryAddress>, RepositoryError> {
        let row: Option<AddressRow> =
            sqlx::query_as("SELECT address, lat, lon FROM users WHERE id = $1")
                .bind(user_id.as_str())
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(|r| DeliveryAddress {
            address: r.address,
            coords: match (r.lat, r.lon) {
                (Some(latitude), Some(longitude)) => Some(Coordinates {
                    latitude,
                    longitude,
                }),
                _ => None,
            },
        }))
    }
}
