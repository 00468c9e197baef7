//! The catalog filter.
//!
//! [`filter`] is a pure function from a product snapshot plus the active
//! criteria to the matching subset. It is re-run synchronously whenever any
//! criterion changes; since the output is deterministic, callers are free to
//! memoize, but nothing here requires it.
//!
//! Missing optional product fields have documented defaults rather than ad
//! hoc truthiness: an absent sugar level counts as 0, an absent egg flag as
//! eggless, and a product without a kind never matches a non-empty allow-list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A catalog product, as fetched from the product store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    /// 0.0 to 5.0.
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_egg: Option<bool>,
    /// 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar_level: Option<u32>,
    /// Cake type used by the type allow-list filter ("Pastry", "Cookie", ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Merchandising tag ("BEST SELLER", "30% OFF", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Egg-content filter choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DietaryFilter {
    /// No restriction.
    #[default]
    Any,
    /// Only products with egg.
    WithEgg,
    /// Only products without egg (an absent flag counts as eggless).
    Eggless,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl Default for PriceRange {
    /// The full range; passes every non-negative price.
    fn default() -> Self {
        Self {
            min: Price::ZERO,
            max: Price::MAX,
        }
    }
}

impl PriceRange {
    /// Whether a price falls inside the range, both ends inclusive.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && price <= self.max
    }
}

/// The active filter predicates. The default value disables every predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against name, description, and
    /// category. Empty matches everything.
    pub search_text: String,
    pub dietary: DietaryFilter,
    pub sugar_free_only: bool,
    /// Products with a sugar level above this are excluded. Absent sugar
    /// levels count as 0, so the ceiling only ever removes products that
    /// declare one.
    pub sugar_level_ceiling: u32,
    /// 0 disables the rating predicate.
    pub rating_floor: f32,
    /// Empty means no restriction; otherwise the product's kind must be a
    /// member. Products without a kind never match a non-empty list.
    pub allowed_kinds: BTreeSet<String>,
    pub price_range: PriceRange,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            dietary: DietaryFilter::Any,
            sugar_free_only: false,
            sugar_level_ceiling: 100,
            rating_floor: 0.0,
            allowed_kinds: BTreeSet::new(),
            price_range: PriceRange::default(),
        }
    }
}

impl FilterCriteria {
    /// Whether a single product passes every active predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_dietary(product)
            && (!self.sugar_free_only || product.sugar_free.unwrap_or(false))
            && product.sugar_level.unwrap_or(0) <= self.sugar_level_ceiling
            && (self.rating_floor == 0.0 || product.rating >= self.rating_floor)
            && self.matches_kind(product)
            && self.price_range.contains(product.price)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
            || product
                .category
                .as_ref()
                .is_some_and(|category| category.to_lowercase().contains(&needle))
    }

    fn matches_dietary(&self, product: &Product) -> bool {
        match self.dietary {
            DietaryFilter::Any => true,
            DietaryFilter::WithEgg => product.has_egg.unwrap_or(false),
            DietaryFilter::Eggless => !product.has_egg.unwrap_or(false),
        }
    }

    fn matches_kind(&self, product: &Product) -> bool {
        if self.allowed_kinds.is_empty() {
            return true;
        }
        product
            .kind
            .as_ref()
            .is_some_and(|kind| self.allowed_kinds.contains(kind))
    }
}

/// Select the products matching every active predicate.
///
/// Stable: the output preserves the input ordering. Pure: no side effects,
/// deterministic for identical inputs.
#[must_use]
pub fn filter<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| criteria.matches(product))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price: Price::from_cents(cents),
            images: Vec::new(),
            rating: 4.0,
            calories: None,
            category: None,
            sugar_free: None,
            has_egg: None,
            sugar_level: None,
            kind: None,
            tag: None,
        }
    }

    fn sample_catalog() -> Vec<Product> {
        vec![
            Product {
                description: "Smooth, creamy cheesecake topped with fresh strawberries."
                    .to_owned(),
                rating: 5.0,
                sugar_level: Some(50),
                sugar_free: Some(false),
                has_egg: Some(true),
                kind: Some("Strawberry Cake".to_owned()),
                category: Some("Celebration".to_owned()),
                ..product("2", "Strawberry Cheesecake", 1500)
            },
            Product {
                description: "Layers of flaky phyllo pastry.".to_owned(),
                rating: 3.5,
                sugar_level: Some(80),
                sugar_free: Some(false),
                has_egg: Some(false),
                kind: Some("Pastry".to_owned()),
                category: Some("Specialty".to_owned()),
                ..product("3", "Baklava", 800)
            },
            Product {
                description: "Elegant French almond cookies.".to_owned(),
                rating: 4.4,
                sugar_level: Some(30),
                sugar_free: Some(true),
                has_egg: Some(true),
                kind: Some("Cookie".to_owned()),
                category: Some("Celebration".to_owned()),
                ..product("4", "Macarons", 500)
            },
        ]
    }

    #[test]
    fn default_criteria_return_full_input_in_order() {
        let catalog = sample_catalog();
        let matches = filter(&catalog, &FilterCriteria::default());

        let ids: Vec<&str> = matches.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "4"]);
    }

    #[test]
    fn search_is_case_insensitive_over_name() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            search_text: "cheesecake".to_owned(),
            ..FilterCriteria::default()
        };

        let matches = filter(&catalog, &criteria);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Strawberry Cheesecake");
    }

    #[test]
    fn search_also_covers_description_and_category() {
        let catalog = sample_catalog();

        let by_description = FilterCriteria {
            search_text: "PHYLLO".to_owned(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&catalog, &by_description)[0].name, "Baklava");

        let by_category = FilterCriteria {
            search_text: "celebration".to_owned(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&catalog, &by_category).len(), 2);
    }

    #[test]
    fn price_range_is_inclusive_both_ends() {
        let catalog = vec![product("a", "Twelve", 1200), product("b", "Eight", 800)];
        let criteria = FilterCriteria {
            price_range: PriceRange {
                min: Price::from_cents(100),
                max: Price::from_cents(1000),
            },
            ..FilterCriteria::default()
        };

        let matches = filter(&catalog, &criteria);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Eight");

        // Boundary values are included.
        let exactly_max = FilterCriteria {
            price_range: PriceRange {
                min: Price::from_cents(800),
                max: Price::from_cents(800),
            },
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&catalog, &exactly_max).len(), 1);
    }

    #[test]
    fn eggless_treats_absent_flag_as_eggless() {
        let mut no_flag = product("x", "Mystery", 500);
        no_flag.has_egg = None;
        let catalog = vec![no_flag];

        let eggless = FilterCriteria {
            dietary: DietaryFilter::Eggless,
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&catalog, &eggless).len(), 1);

        let with_egg = FilterCriteria {
            dietary: DietaryFilter::WithEgg,
            ..FilterCriteria::default()
        };
        assert!(filter(&catalog, &with_egg).is_empty());
    }

    #[test]
    fn sugar_level_ceiling_defaults_absent_levels_to_zero() {
        let mut unleveled = product("x", "Plain", 500);
        unleveled.sugar_level = None;
        let catalog = vec![unleveled];

        let strict = FilterCriteria {
            sugar_level_ceiling: 0,
            ..FilterCriteria::default()
        };
        assert_eq!(filter(&catalog, &strict).len(), 1);
    }

    #[test]
    fn sugar_free_only_requires_explicit_flag() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            sugar_free_only: true,
            ..FilterCriteria::default()
        };

        let matches = filter(&catalog, &criteria);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Macarons");
    }

    #[test]
    fn rating_floor_zero_disables_the_predicate() {
        let mut unrated = product("x", "New", 500);
        unrated.rating = 0.0;
        let catalog = vec![unrated];

        assert_eq!(filter(&catalog, &FilterCriteria::default()).len(), 1);

        let floored = FilterCriteria {
            rating_floor: 4.0,
            ..FilterCriteria::default()
        };
        assert!(filter(&catalog, &floored).is_empty());
    }

    #[test]
    fn kindless_products_never_match_a_nonempty_allow_list() {
        let kindless = product("x", "Unlabeled", 500);
        let catalog = vec![kindless];

        let criteria = FilterCriteria {
            allowed_kinds: BTreeSet::from(["Pastry".to_owned()]),
            ..FilterCriteria::default()
        };
        assert!(filter(&catalog, &criteria).is_empty());
    }

    #[test]
    fn allow_list_selects_member_kinds() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            allowed_kinds: BTreeSet::from(["Pastry".to_owned(), "Cookie".to_owned()]),
            ..FilterCriteria::default()
        };

        let names: Vec<&str> = filter(&catalog, &criteria)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Baklava", "Macarons"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria {
            dietary: DietaryFilter::WithEgg,
            rating_floor: 4.5,
            ..FilterCriteria::default()
        };

        let matches = filter(&catalog, &criteria);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Strawberry Cheesecake");
    }
}
