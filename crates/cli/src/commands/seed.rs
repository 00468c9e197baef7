//! Catalog seeding command.
//!
//! Loads the launch dessert lineup. Seeding is idempotent: rows that already
//! exist are left untouched, so re-running after an admin has edited the
//! catalog never clobbers those edits.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

/// Errors from the seed command.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    images: &'static [&'static str],
    rating: f32,
    calories: i32,
    category: &'static str,
    sugar_free: bool,
    has_egg: bool,
    sugar_level: i32,
    kind: &'static str,
    tag: Option<&'static str>,
}

/// The launch lineup the mobile app shipped with.
const LINEUP: &[SeedProduct] = &[
    SeedProduct {
        id: "1",
        name: "Molten lava cake",
        description: "A delicate chocolate cake with a rich, gooey molten center.",
        price_cents: 1200,
        images: &[
            "https://cdn.craft.cloud/224393fa-1975-4d80-9067-ada3cb5948ca/assets/detail_White_Cocoa_Oatmeal_Hot_Lava_Cake.png",
            "https://hips.hearstapps.com/hmg-prod/images/strawberry-cheesecake-1648487650.jpg",
        ],
        rating: 4.6,
        calories: 250,
        category: "Specialty",
        sugar_free: false,
        has_egg: true,
        sugar_level: 60,
        kind: "Chocolate Cake",
        tag: Some("BEST SELLER"),
    },
    SeedProduct {
        id: "2",
        name: "Strawberry Cheesecake",
        description: "Smooth, creamy cheesecake with a golden crust and topped with fresh strawberries.",
        price_cents: 1500,
        images: &["https://hips.hearstapps.com/hmg-prod/images/strawberry-cheesecake-1648487650.jpg"],
        rating: 5.0,
        calories: 200,
        category: "Celebration",
        sugar_free: false,
        has_egg: true,
        sugar_level: 50,
        kind: "Strawberry Cake",
        tag: Some("30% OFF"),
    },
    SeedProduct {
        id: "3",
        name: "Baklava",
        description: "Traditional Middle Eastern dessert made with layers of flaky phyllo pastry.",
        price_cents: 800,
        images: &["https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRRgqytQcxPCjXV4SEB0796nVfVPLTtomBjUg&s"],
        rating: 3.5,
        calories: 190,
        category: "Specialty",
        sugar_free: false,
        has_egg: false,
        sugar_level: 80,
        kind: "Pastry",
        tag: Some("20% OFF"),
    },
    SeedProduct {
        id: "4",
        name: "Macarons",
        description: "Elegant French cookies made from almond flour, meringue, and filled with rich cream.",
        price_cents: 500,
        images: &["https://mealsbymolly.com/wp-content/uploads/2021/08/Raspberry-Macarons-1320x1440.jpg"],
        rating: 4.4,
        calories: 180,
        category: "Celebration",
        sugar_free: true,
        has_egg: true,
        sugar_level: 30,
        kind: "Cookie",
        tag: None,
    },
    SeedProduct {
        id: "5",
        name: "Kunafa",
        description: "Sweet and cheesy Middle Eastern dessert made from shredded filo dough.",
        price_cents: 900,
        images: &["https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSu8EPlP-u5ObtyzqzoRSwTEww4aXWx0UMHkA&s"],
        rating: 2.5,
        calories: 160,
        category: "Specialty",
        sugar_free: false,
        has_egg: true,
        sugar_level: 10,
        kind: "Middle Eastern",
        tag: None,
    },
    SeedProduct {
        id: "6",
        name: "Tiramisu",
        description: "Italian classic made with espresso-soaked ladyfingers layered with mascarpone cream.",
        price_cents: 1100,
        images: &["https://www.bakinglikeachef.com/wp-content/uploads/italian-tiramisu.jpg"],
        rating: 4.8,
        calories: 90,
        category: "Celebration",
        sugar_free: false,
        has_egg: false,
        sugar_level: 0,
        kind: "Italian",
        tag: Some("NEW"),
    },
];

/// Seed the catalog with the launch lineup.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .map_err(|_| SeedError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let mut inserted = 0_u32;
    for product in LINEUP {
        let images: Vec<String> = product.images.iter().map(ToString::to_string).collect();

        let result = sqlx::query(
            "INSERT INTO products
                 (id, name, description, price, images, rating, calories,
                  category, sugar_free, has_egg, sugar_level, kind, tag)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(product.id)
        .bind(product.name)
        .bind(product.description)
        .bind(Decimal::new(product.price_cents, 2))
        .bind(&images)
        .bind(product.rating)
        .bind(product.calories)
        .bind(product.category)
        .bind(product.sugar_free)
        .bind(product.has_egg)
        .bind(product.sugar_level)
        .bind(product.kind)
        .bind(product.tag)
        .execute(&pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
            tracing::info!(name = product.name, "Seeded product");
        } else {
            tracing::info!(name = product.name, "Already present, skipped");
        }
    }

    tracing::info!(inserted, total = LINEUP.len(), "Seeding complete");
    Ok(())
}
