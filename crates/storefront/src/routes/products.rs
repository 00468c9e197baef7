//! Product route handlers.
//!
//! The listing endpoint exposes every catalog-filter predicate as a query
//! parameter and runs the pure filter over the cached catalog snapshot.

use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use dessert_devs_core::{
    DietaryFilter, FilterCriteria, Price, PriceRange, Product, ProductId, filter,
};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Deserialize empty strings as None for optional typed fields.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Catalog listing query parameters. Everything is optional; an empty query
/// returns the full catalog in stored order.
#[derive(Debug, Deserialize, Default)]
pub struct CatalogQuery {
    /// Search text matched against name/description/category.
    #[serde(default)]
    pub q: String,
    /// Egg filter: "with_egg" or "eggless".
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sugar_free: Option<bool>,
    /// Sugar level ceiling, 0-100.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub sugar_level: Option<u32>,
    /// Minimum rating; 0 disables.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub rating: Option<f32>,
    /// Comma-separated cake type allow-list.
    #[serde(default)]
    pub kinds: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_min: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_max: Option<Decimal>,
}

impl CatalogQuery {
    /// Translate query parameters into filter criteria, leaving untouched
    /// predicates at their pass-everything defaults.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        let defaults = FilterCriteria::default();

        let dietary = match self.dietary.as_deref() {
            Some("with_egg") => DietaryFilter::WithEgg,
            Some("eggless") => DietaryFilter::Eggless,
            _ => DietaryFilter::Any,
        };

        let allowed_kinds: BTreeSet<String> = self
            .kinds
            .as_deref()
            .map(|kinds| {
                kinds
                    .split(',')
                    .map(str::trim)
                    .filter(|kind| !kind.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        FilterCriteria {
            search_text: self.q.clone(),
            dietary,
            sugar_free_only: self.sugar_free.unwrap_or(false),
            sugar_level_ceiling: self.sugar_level.unwrap_or(defaults.sugar_level_ceiling),
            rating_floor: self.rating.unwrap_or(0.0),
            allowed_kinds,
            price_range: PriceRange {
                min: self.price_min.map_or(Price::ZERO, Price::new),
                max: self.price_max.map_or(Price::MAX, Price::new),
            },
        }
    }
}

/// Catalog listing, filtered by the active criteria.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.product_listing().await?;
    let criteria = query.criteria();

    let matches: Vec<Product> = filter(&products, &criteria).into_iter().cloned().collect();
    Ok(Json(matches))
}

/// Product detail. Reads through the repository so a just-created product is
/// visible before the listing cache rolls over.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_maps_to_default_criteria() {
        let query = CatalogQuery::default();
        assert_eq!(query.criteria(), FilterCriteria::default());
    }

    #[test]
    fn dietary_values_map_to_filter_variants() {
        let with_egg = CatalogQuery {
            dietary: Some("with_egg".to_owned()),
            ..CatalogQuery::default()
        };
        assert_eq!(with_egg.criteria().dietary, DietaryFilter::WithEgg);

        let eggless = CatalogQuery {
            dietary: Some("eggless".to_owned()),
            ..CatalogQuery::default()
        };
        assert_eq!(eggless.criteria().dietary, DietaryFilter::Eggless);

        let unknown = CatalogQuery {
            dietary: Some("vegan".to_owned()),
            ..CatalogQuery::default()
        };
        assert_eq!(unknown.criteria().dietary, DietaryFilter::Any);
    }

    #[test]
    fn kinds_split_on_commas_and_trim() {
        let query = CatalogQuery {
            kinds: Some("Pastry, Cookie ,,".to_owned()),
            ..CatalogQuery::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.allowed_kinds.len(), 2);
        assert!(criteria.allowed_kinds.contains("Pastry"));
        assert!(criteria.allowed_kinds.contains("Cookie"));
    }

    #[test]
    fn price_bounds_default_to_full_range() {
        let query = CatalogQuery {
            price_min: Some(Decimal::new(100, 2)),
            ..CatalogQuery::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.price_range.min, Price::new(Decimal::new(100, 2)));
        assert_eq!(criteria.price_range.max, Price::MAX);
    }

    #[test]
    fn empty_string_params_deserialize_as_none() {
        let query: CatalogQuery =
            serde_urlencoded::from_str("q=&sugar_level=&rating=&price_min=")
                .expect("deserialize");
        assert!(query.sugar_level.is_none());
        assert!(query.rating.is_none());
        assert!(query.price_min.is_none());
    }
}
