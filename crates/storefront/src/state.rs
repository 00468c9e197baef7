//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use dessert_devs_core::{Branch, Product};

use crate::config::{StorefrontConfig, pickup_branches};
use crate::db::ProductRepository;
use crate::error::AppError;

/// How long a catalog snapshot stays fresh. The mobile app fetches the
/// listing once per screen visit; a short TTL keeps admin edits visible
/// without hammering the database.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    branches: Vec<Branch>,
    product_cache: Cache<(), Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let product_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                branches: pickup_branches(),
                product_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The configured pickup branches.
    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        &self.inner.branches
    }

    /// The catalog snapshot, served through a short-TTL cache.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` (wrapped) when the underlying fetch fails.
    pub async fn product_listing(&self) -> Result<Arc<Vec<Product>>, AppError> {
        self.inner
            .product_cache
            .try_get_with((), async {
                let products = ProductRepository::new(self.pool()).list().await?;
                Ok::<_, crate::db::RepositoryError>(Arc::new(products))
            })
            .await
            .map_err(|e| AppError::Internal(format!("catalog fetch failed: {e}")))
    }
}
