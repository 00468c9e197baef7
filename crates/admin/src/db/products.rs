//! Product repository (the writing side of the catalog).
//!
//! Queries are runtime-checked (`query_as` with binds) since no database is
//! available at compile time.

use sqlx::PgPool;
use uuid::Uuid;

use dessert_devs_core::{Price, Product, ProductId};

use super::RepositoryError;
use crate::models::{NewProduct, ProductPatch};

/// Raw product row as stored in `products`.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price: rust_decimal::Decimal,
    images: Vec<String>,
    rating: f32,
    calories: Option<i32>,
    category: Option<String>,
    sugar_free: Option<bool>,
    has_egg: Option<bool>,
    sugar_level: Option<i32>,
    kind: Option<String>,
    tag: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let into_u32 = |value: Option<i32>, what: &str| {
            value
                .map(|v| {
                    u32::try_from(v).map_err(|_| {
                        RepositoryError::DataCorruption(format!(
                            "negative {what} for product {}",
                            row.id
                        ))
                    })
                })
                .transpose()
        };
        let calories = into_u32(row.calories, "calories")?;
        let sugar_level = into_u32(row.sugar_level, "sugar level")?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: Price::new(row.price),
            images: row.images,
            rating: row.rating,
            calories,
            category: row.category,
            sugar_free: row.sugar_free,
            has_egg: row.has_egg,
            sugar_level,
            kind: row.kind,
            tag: row.tag,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, name, description, price, images, rating, calories, \
     category, sugar_free, has_egg, sugar_level, kind, tag";

/// Convert a payload count into the column type, erroring on overflow instead
/// of silently storing NULL. Payload validation rejects these earlier; this
/// keeps the repository honest on its own.
fn into_i32(value: Option<u32>, what: &str) -> Result<Option<i32>, RepositoryError> {
    value
        .map(|v| {
            i32::try_from(v)
                .map_err(|_| RepositoryError::DataCorruption(format!("{what} value out of range")))
        })
        .transpose()
}

/// Repository for catalog writes (and dashboard reads).
pub struct ProductAdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductAdminRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Full catalog for the dashboard, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Insert a new product with a generated ID and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let id = Uuid::new_v4().to_string();

        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO products
                 (id, name, description, price, images, rating, calories,
                  category, sugar_free, has_egg, sugar_level, kind, tag)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.images)
        .bind(new.rating)
        .bind(into_i32(new.calories, "calories")?)
        .bind(&new.category)
        .bind(new.sugar_free)
        .bind(new.has_egg)
        .bind(into_i32(new.sugar_level, "sugar level")?)
        .bind(&new.kind)
        .bind(&new.tag)
        .fetch_one(self.pool)
        .await?;

        Product::try_from(row)
    }

    /// Apply a partial update and return the updated product, or `None` when
    /// the ID does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE products SET
                 name        = COALESCE($2, name),
                 description = COALESCE($3, description),
                 price       = COALESCE($4, price),
                 images      = COALESCE($5, images),
                 rating      = COALESCE($6, rating),
                 calories    = COALESCE($7, calories),
                 category    = COALESCE($8, category),
                 sugar_free  = COALESCE($9, sugar_free),
                 has_egg     = COALESCE($10, has_egg),
                 sugar_level = COALESCE($11, sugar_level),
                 kind        = COALESCE($12, kind),
                 tag         = COALESCE($13, tag),
                 updated_at  = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id.as_str())
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(&patch.images)
        .bind(patch.rating)
        .bind(into_i32(patch.calories, "calories")?)
        .bind(&patch.category)
        .bind(patch.sugar_free)
        .bind(patch.has_egg)
        .bind(into_i32(patch.sugar_level, "sugar level")?)
        .bind(&patch.kind)
        .bind(&patch.tag)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Delete a product. Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_counts_error_instead_of_binding_null() {
        assert!(matches!(into_i32(Some(160), "calories"), Ok(Some(160))));
        assert!(matches!(into_i32(None, "calories"), Ok(None)));
        assert!(into_i32(Some(u32::MAX), "calories").is_err());
    }
}
