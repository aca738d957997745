//! Catalog domain types as managed by the admin panel.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use almacen_core::{CategoryId, ProductId};

/// A product under administration.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub images: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product category under administration.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductData {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub images: Vec<String>,
    pub category_id: Option<CategoryId>,
}

/// Fields accepted when creating or replacing a category.
#[derive(Debug, Clone)]
pub struct CategoryData {
    pub name: String,
    pub description: Option<String>,
}
