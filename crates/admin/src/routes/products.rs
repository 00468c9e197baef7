//! Catalog management handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use dessert_devs_core::{Product, ProductId};

use crate::db::ProductAdminRepository;
use crate::error::{AdminError, Result};
use crate::middleware::RequireApiToken;
use crate::models::{NewProduct, ProductPatch};
use crate::state::AppState;

/// GET /products - full catalog, oldest first.
#[instrument(skip_all)]
pub async fn index(
    _auth: RequireApiToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductAdminRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// POST /products - create a product.
#[instrument(skip_all, fields(name = %new.name))]
pub async fn create(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    new.validate().map_err(AdminError::BadRequest)?;

    let product = ProductAdminRepository::new(state.pool())
        .insert(&new)
        .await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id} - partial update.
#[instrument(skip_all, fields(product_id = %id))]
pub async fn update(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    patch.validate().map_err(AdminError::BadRequest)?;

    let product = ProductAdminRepository::new(state.pool())
        .update(&id, &patch)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// DELETE /products/{id}.
#[instrument(skip_all, fields(product_id = %id))]
pub async fn remove(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let deleted = ProductAdminRepository::new(state.pool()).delete(&id).await?;

    if deleted {
        tracing::info!(product_id = %id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AdminError::NotFound(format!("product {id}")))
    }
}
