//! Product write payloads.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Upper bound for calorie counts; the column is a 32-bit integer.
const MAX_CALORIES: u32 = i32::MAX as u32;

/// Payload for creating a product. Name and price are required; everything
/// else defaults the way the dashboard's add-product form leaves it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sugar_free: Option<bool>,
    #[serde(default)]
    pub has_egg: Option<bool>,
    #[serde(default)]
    pub sugar_level: Option<u32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl NewProduct {
    /// Validate required fields and documented ranges.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message suitable for a 400 response.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_owned());
        }
        if self.price < Decimal::ZERO {
            return Err("price must be non-negative".to_owned());
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err("rating must be between 0 and 5".to_owned());
        }
        if self.sugar_level.is_some_and(|level| level > 100) {
            return Err("sugar level must be between 0 and 100".to_owned());
        }
        if self.calories.is_some_and(|calories| calories > MAX_CALORIES) {
            return Err("calories value is out of range".to_owned());
        }
        Ok(())
    }
}

/// Partial product update. Omitted fields stay unchanged; this endpoint
/// cannot clear an optional field back to absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sugar_free: Option<bool>,
    #[serde(default)]
    pub has_egg: Option<bool>,
    #[serde(default)]
    pub sugar_level: Option<u32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl ProductPatch {
    /// Validate documented ranges on the provided fields.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message suitable for a 400 response.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err("name must not be empty".to_owned());
        }
        if self.price.is_some_and(|price| price < Decimal::ZERO) {
            return Err("price must be non-negative".to_owned());
        }
        if self
            .rating
            .is_some_and(|rating| !(0.0..=5.0).contains(&rating))
        {
            return Err("rating must be between 0 and 5".to_owned());
        }
        if self.sugar_level.is_some_and(|level| level > 100) {
            return Err("sugar level must be between 0 and 100".to_owned());
        }
        if self.calories.is_some_and(|calories| calories > MAX_CALORIES) {
            return Err("calories value is out of range".to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewProduct {
        NewProduct {
            name: "Kunafa".to_owned(),
            description: String::new(),
            price: Decimal::new(900, 2),
            images: Vec::new(),
            rating: 2.5,
            calories: Some(160),
            category: Some("Specialty".to_owned()),
            sugar_free: Some(false),
            has_egg: Some(true),
            sugar_level: Some(10),
            kind: Some("Middle Eastern".to_owned()),
            tag: None,
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut product = valid();
        product.name = "  ".to_owned();
        assert!(product.validate().is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut product = valid();
        product.price = Decimal::new(-1, 0);
        assert!(product.validate().is_err());
    }

    #[test]
    fn out_of_range_sugar_level_is_rejected() {
        let mut product = valid();
        product.sugar_level = Some(101);
        assert!(product.validate().is_err());
    }

    #[test]
    fn out_of_range_calories_is_rejected() {
        let mut product = valid();
        product.calories = Some(u32::MAX);
        assert!(product.validate().is_err());
    }

    #[test]
    fn patch_only_validates_provided_fields() {
        assert!(ProductPatch::default().validate().is_ok());

        let patch = ProductPatch {
            rating: Some(5.5),
            ..ProductPatch::default()
        };
        assert!(patch.validate().is_err());

        let patch = ProductPatch {
            calories: Some(u32::MAX),
            ..ProductPatch::default()
        };
        assert!(patch.validate().is_err());
    }
}
