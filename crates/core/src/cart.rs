//! The cart ledger.
//!
//! A cart is an ordered list of line items. Two lines are the *same* line if
//! and only if their product ID and all three variant attributes are equal,
//! with "both absent" counting as equal. Adding merges quantities into an
//! existing line; removal is explicit; dropping a quantity below 1 through
//! `update_quantity` is a deliberate no-op rather than a removal path.
//!
//! The total is recomputed on every read instead of being cached, so it can
//! never go stale. Carts are small (single-digit to low-double-digit lines)
//! and the O(n) scan is irrelevant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Egg content of a cake variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dietary {
    Egg,
    Eggless,
}

/// The variant a shopper selected for a product.
///
/// All three attributes are optional; products without size/type/gluten
/// choices simply leave them unset. Equality is structural, so an unset
/// attribute only matches another unset attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cake_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Dietary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gluten_free: Option<bool>,
}

/// One entry in the cart: a product plus a chosen variant and quantity.
///
/// Display fields (`name`, `image`, `rating`, `calories`) and the unit price
/// are denormalized snapshots captured when the line was added, so the cart
/// renders without re-fetching the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub variant: Variant,
    /// Always >= 1; a line that would drop to 0 is removed, never stored.
    pub quantity: u32,
    pub unit_price: Price,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

impl CartLine {
    /// Whether this line is keyed by the given product + variant.
    fn matches(&self, product_id: &ProductId, variant: &Variant) -> bool {
        &self.product_id == product_id && &self.variant == variant
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity)
    }
}

/// Percentage discount granted by a promo code, if recognized.
///
/// Promo codes are policy data baked into the client, not a server-validated
/// concern; unrecognized codes simply clear the discount.
fn discount_rate(code: &str) -> Decimal {
    match code {
        "Elgayar" => Decimal::new(10, 2),
        "DISCOUNT5" => Decimal::new(5, 2),
        _ => Decimal::ZERO,
    }
}

/// The set of line items a shopper intends to purchase.
///
/// Insertion order is display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(default)]
    discount_rate: Decimal,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Add a candidate line to the cart.
    ///
    /// If a line with an exactly-equal (product, variant) key already exists,
    /// its quantity is incremented by the candidate's quantity. Otherwise the
    /// candidate is appended as-is (a candidate quantity of 0 is bumped to 1).
    /// Never fails.
    pub fn add(&mut self, mut item: CartLine) {
        if item.quantity == 0 {
            item.quantity = 1;
        }
        match self
            .lines
            .iter_mut()
            .find(|line| line.matches(&item.product_id, &item.variant))
        {
            Some(existing) => existing.quantity += item.quantity,
            None => self.lines.push(item),
        }
    }

    /// Overwrite the quantity of the line with the given key.
    ///
    /// A `new_quantity` below 1 leaves the line untouched; shrinking a line
    /// away goes through [`Cart::remove`], never through this guard. A
    /// missing key is a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, variant: &Variant, new_quantity: u32) {
        if new_quantity < 1 {
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, variant))
        {
            line.quantity = new_quantity;
        }
    }

    /// Delete the line with the given key. A missing key is a no-op, which
    /// keeps double-tapped "remove" actions idempotent.
    pub fn remove(&mut self, product_id: &ProductId, variant: &Variant) {
        self.lines
            .retain(|line| !line.matches(product_id, variant));
    }

    /// Apply a promo code. Recognized codes set a fixed percentage discount;
    /// anything else clears it.
    pub fn apply_discount(&mut self, code: &str) {
        self.discount_rate = discount_rate(code);
    }

    /// Sum of unit price times quantity over all lines.
    ///
    /// Derived on every call; nothing to invalidate.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Discount amount for the currently applied code, against the current
    /// total.
    #[must_use]
    pub fn discount(&self) -> Decimal {
        self.total() * self.discount_rate
    }

    /// Total minus discount.
    #[must_use]
    pub fn total_after_discount(&self) -> Decimal {
        self.total() - self.discount()
    }

    /// Drop every line and the applied discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount_rate = Decimal::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, variant: Variant, quantity: u32, cents: i64) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            variant,
            quantity,
            unit_price: Price::from_cents(cents),
            name: format!("product {id}"),
            image: None,
            rating: 4.5,
            calories: Some(250),
        }
    }

    fn small_egg() -> Variant {
        Variant {
            cake_size: Some("small".to_owned()),
            dietary: Some(Dietary::Egg),
            gluten_free: Some(false),
        }
    }

    #[test]
    fn adding_same_key_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 1, 1200));
        cart.add(line("1", small_egg(), 1, 1200));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn different_variants_of_same_product_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 1, 1200));
        cart.add(line("1", Variant::default(), 1, 1200));
        let large = Variant {
            cake_size: Some("large".to_owned()),
            ..small_egg()
        };
        cart.add(line("1", large, 1, 1800));

        assert_eq!(cart.lines().len(), 3);
    }

    #[test]
    fn absent_variant_only_matches_absent() {
        let mut cart = Cart::new();
        cart.add(line("1", Variant::default(), 1, 1200));
        // Same product, but with an explicit size: must not merge.
        cart.add(line("1", small_egg(), 1, 1200));
        assert_eq!(cart.lines().len(), 2);

        cart.add(line("1", Variant::default(), 1, 1200));
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn zero_quantity_candidate_defaults_to_one() {
        let mut cart = Cart::new();
        cart.add(line("1", Variant::default(), 0, 1200));
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn update_quantity_below_one_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 3, 1200));

        cart.update_quantity(&ProductId::new("1"), &small_egg(), 0);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn update_quantity_overwrites_rather_than_adds() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 3, 1200));

        cart.update_quantity(&ProductId::new("1"), &small_egg(), 5);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn update_quantity_on_missing_key_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 1, 1200));
        cart.update_quantity(&ProductId::new("2"), &small_egg(), 5);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn remove_then_add_starts_a_fresh_line() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 4, 1200));
        cart.remove(&ProductId::new("1"), &small_egg());
        assert!(cart.is_empty());

        cart.add(line("1", small_egg(), 1, 1200));
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn remove_on_missing_key_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 1, 1200));
        cart.remove(&ProductId::new("1"), &Variant::default());
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn total_is_invariant_under_add_order() {
        let mut forward = Cart::new();
        forward.add(line("1", small_egg(), 2, 1200));
        forward.add(line("2", Variant::default(), 1, 800));
        forward.add(line("1", small_egg(), 1, 1200));

        let mut reversed = Cart::new();
        reversed.add(line("1", small_egg(), 1, 1200));
        reversed.add(line("1", small_egg(), 2, 1200));
        reversed.add(line("2", Variant::default(), 1, 800));

        assert_eq!(forward.total(), reversed.total());
        assert_eq!(forward.total(), Decimal::new(4400, 2));
    }

    #[test]
    fn discount_codes_map_to_fixed_rates() {
        let mut cart = Cart::new();
        cart.add(line("1", Variant::default(), 1, 10000));

        cart.apply_discount("Elgayar");
        assert_eq!(cart.discount(), Decimal::new(1000, 2));
        assert_eq!(cart.total_after_discount(), Decimal::new(9000, 2));

        cart.apply_discount("DISCOUNT5");
        assert_eq!(cart.discount(), Decimal::new(500, 2));

        cart.apply_discount("BOGUS");
        assert_eq!(cart.discount(), Decimal::ZERO);
    }

    #[test]
    fn discount_tracks_current_total() {
        let mut cart = Cart::new();
        cart.add(line("1", Variant::default(), 1, 10000));
        cart.apply_discount("Elgayar");

        cart.update_quantity(&ProductId::new("1"), &Variant::default(), 2);
        assert_eq!(cart.discount(), Decimal::new(2000, 2));
    }

    #[test]
    fn clear_drops_lines_and_discount() {
        let mut cart = Cart::new();
        cart.add(line("1", Variant::default(), 2, 1000));
        cart.apply_discount("Elgayar");
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.discount(), Decimal::ZERO);
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(line("1", small_egg(), 2, 1200));
        cart.add(line("2", Variant::default(), 3, 800));
        assert_eq!(cart.item_count(), 5);
    }
}
