//! Product repository (read-only on the storefront side).
//!
//! The admin service owns writes; the storefront only lists and fetches.
//! Queries are runtime-checked (`query_as` with binds) since no database is
//! available at compile time.

use sqlx::PgPool;

use dessert_devs_core::{Price, Product, ProductId};

use super::RepositoryError;

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
        let calories = row
            .calories
            .map(|c| {
                u32::try_from(c).map_err(|_| {
                    RepositoryError::DataCorruption(format!(
                        "negative calories for product {}",
                        row.id
                    ))
                })
            })
            .transpose()?;
        let sugar_level = row
            .sugar_level
            .map(|s| {
                u32::try_from(s).map_err(|_| {
                    RepositoryError::DataCorruption(format!(
                        "negative sugar level for product {}",
                        row.id
                    ))
                })
            })
            .transpose()?;

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

/// Repository for catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the full catalog, oldest first.
    ///
    /// The catalog filter runs over this snapshot in memory; ordering here is
    /// the display order the filter preserves.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for out-of-range stored values.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Fetch a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }
}
