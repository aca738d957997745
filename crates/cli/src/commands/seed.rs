//! Catalog seeding command for local development.

use rust_decimal::Decimal;

use almacen_admin::db::{CategoryRepository, ProductRepository};
use almacen_admin::models::catalog::{CategoryData, ProductData};

use super::connect;

/// Seed the catalog with a small demo inventory.
///
/// Refuses to run against a non-empty catalog so it cannot trample real
/// data.
///
/// # Errors
///
/// Returns an error if the database is unreachable, the catalog is not
/// empty, or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    let product_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if product_count > 0 {
        return Err("catalog is not empty; refusing to seed".into());
    }

    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    let almacen = categories
        .create(&CategoryData {
            name: "Almacén".to_string(),
            description: Some("Productos de almacén".to_string()),
        })
        .await?;
    let bebidas = categories
        .create(&CategoryData {
            name: "Bebidas".to_string(),
            description: None,
        })
        .await?;

    let demo_products = [
        ("Yerba Mate 1kg", "4500.00", Some(almacen.id)),
        ("Alfajores x12", "3200.00", Some(almacen.id)),
        ("Dulce de Leche 400g", "2100.50", Some(almacen.id)),
        ("Agua con gas 1.5L", "950.00", Some(bebidas.id)),
        ("Gaseosa Cola 2.25L", "1800.00", Some(bebidas.id)),
    ];

    for (name, price, category_id) in demo_products {
        products
            .create(&ProductData {
                name: name.to_string(),
                description: None,
                price: price.parse::<Decimal>()?,
                images: Vec::new(),
                category_id,
            })
            .await?;
    }

    tracing::info!(
        products = demo_products.len(),
        "catalog seeded with demo data"
    );

    Ok(())
}
