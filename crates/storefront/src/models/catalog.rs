//! Catalog domain types.
//!
//! Products and categories are owned by the external store; the storefront
//! only ever reads them. Prices are `Decimal` end to end - they are never
//! run through floating point.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use almacen_core::{CategoryId, ProductId, ProductSnapshot};

/// A product as read from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Display image URLs, first one is the primary image.
    pub images: Vec<String>,
    /// Category this product belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The add-to-cart snapshot of this product: identity plus the display
    /// fields frozen at add time.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.to_string(),
            name: self.name.clone(),
            price: self.price,
            image: self.images.first().cloned(),
        }
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_primary_image() {
        let product = Product {
            id: ProductId::generate(),
            name: "Alfajores x12".to_string(),
            description: None,
            price: "3200.00".parse().unwrap(),
            images: vec![
                "https://cdn.example.com/a.jpg".to_string(),
                "https://cdn.example.com/b.jpg".to_string(),
            ],
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let snapshot = product.snapshot();
        assert_eq!(snapshot.id, product.id.to_string());
        assert_eq!(snapshot.name, "Alfajores x12");
        assert_eq!(snapshot.image.as_deref(), Some("https://cdn.example.com/a.jpg"));
    }

    #[test]
    fn test_snapshot_without_images() {
        let product = Product {
            id: ProductId::generate(),
            name: "Sin foto".to_string(),
            description: None,
            price: "10".parse().unwrap(),
            images: Vec::new(),
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(product.snapshot().image.is_none());
    }
}
