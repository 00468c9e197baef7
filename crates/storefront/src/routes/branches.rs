//! Pickup branch route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use dessert_devs_core::{Branch, closest_branch};

use crate::error::Result;
use crate::state::AppState;

/// Coordinates of the shopper, from the device location service.
#[derive(Debug, Deserialize)]
pub struct ClosestQuery {
    pub lat: f64,
    pub lon: f64,
}

/// The configured pickup branch list.
pub async fn index(State(state): State<AppState>) -> Json<Vec<Branch>> {
    Json(state.branches().to_vec())
}

/// The branch nearest to the shopper, by planar distance.
pub async fn closest(
    State(state): State<AppState>,
    Query(query): Query<ClosestQuery>,
) -> Result<Json<Branch>> {
    let branch = closest_branch(query.lat, query.lon, state.branches())?;
    Ok(Json(branch.clone()))
}
