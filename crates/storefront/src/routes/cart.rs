//! Cart route handlers.
//!
//! The cart ledger lives in the session; every handler loads it, applies one
//! ledger operation, and writes it back. Prices and display fields are
//! snapshotted server-side from the catalog at add time, so the client never
//! supplies a price.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use dessert_devs_core::{Cart, CartLine, Product, ProductId, Variant};

use crate::error::{AppError, Result};
use crate::models::session::session_keys;
use crate::state::AppState;

/// Cart display data returned by every cart mutation.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub discount: Decimal,
    pub total_after_discount: Decimal,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
            discount: cart.discount(),
            total_after_discount: cart.total_after_discount(),
            item_count: cart.item_count(),
        }
    }
}

/// Load the cart from the session, defaulting to empty.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub variant: Variant,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub variant: Variant,
    pub quantity: u32,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub variant: Variant,
}

/// Promo code request body.
#[derive(Debug, Deserialize)]
pub struct DiscountRequest {
    pub code: String,
}

/// Badge count response.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Build a cart line from the catalog product plus the selected variant.
fn line_from_product(product: &Product, variant: Variant, quantity: u32) -> CartLine {
    CartLine {
        product_id: product.id.clone(),
        variant,
        quantity,
        unit_price: product.price,
        name: product.name.clone(),
        image: product.images.first().cloned(),
        rating: product.rating,
        calories: product.calories,
    }
}

/// Current cart with totals.
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Merge-add a line to the cart.
#[instrument(skip(state, session), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    let products = state.product_listing().await?;
    let product = products
        .iter()
        .find(|p| p.id == request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(line_from_product(
        product,
        request.variant,
        request.quantity.unwrap_or(1),
    ));
    save_cart(&session, &cart).await?;

    Ok((StatusCode::OK, Json(CartView::from(&cart))))
}

/// Overwrite a line quantity. Quantities below 1 leave the line unchanged;
/// removal is its own endpoint.
#[instrument(skip(session), fields(product_id = %request.product_id, quantity = request.quantity))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(&request.product_id, &request.variant, request.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove a line. Removing an absent line is a no-op so double-taps stay
/// harmless.
#[instrument(skip(session), fields(product_id = %request.product_id))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&request.product_id, &request.variant);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Apply a promo code. Unrecognized codes clear the discount.
#[instrument(skip(session, request))]
pub async fn apply_discount(
    session: Session,
    Json(request): Json<DiscountRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.apply_discount(&request.code);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Cart badge count.
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.item_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dessert_devs_core::Price;

    fn product() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Molten lava cake".to_owned(),
            description: "Gooey center".to_owned(),
            price: Price::from_cents(1200),
            images: vec!["https://example.com/lava.png".to_owned()],
            rating: 4.6,
            calories: Some(250),
            category: Some("Specialty".to_owned()),
            sugar_free: Some(false),
            has_egg: Some(true),
            sugar_level: Some(60),
            kind: Some("Chocolate Cake".to_owned()),
            tag: None,
        }
    }

    #[test]
    fn line_snapshot_copies_price_and_display_fields() {
        let line = line_from_product(&product(), Variant::default(), 2);

        assert_eq!(line.unit_price, Price::from_cents(1200));
        assert_eq!(line.name, "Molten lava cake");
        assert_eq!(line.image.as_deref(), Some("https://example.com/lava.png"));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.calories, Some(250));
    }

    #[test]
    fn cart_view_exposes_derived_totals() {
        let mut cart = Cart::new();
        cart.add(line_from_product(&product(), Variant::default(), 2));
        cart.apply_discount("Elgayar");

        let view = CartView::from(&cart);
        assert_eq!(view.total, Decimal::new(2400, 2));
        assert_eq!(view.discount, Decimal::new(2400, 3));
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn add_request_accepts_flat_variant_fields() {
        let request: AddToCartRequest = serde_json::from_str(
            r#"{"product_id":"1","cake_size":"small","dietary":"Egg","gluten_free":false,"quantity":2}"#,
        )
        .expect("deserialize");

        assert_eq!(request.variant.cake_size.as_deref(), Some("small"));
        assert_eq!(request.quantity, Some(2));
    }
}
