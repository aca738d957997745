//! Product repository for catalog reads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use almacen_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    images: Vec<String>,
    category_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            images: row.images,
            category_id: row.category_id.map(CategoryId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for read-only product queries.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, newest first, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = match category_id {
            Some(category_id) => {
                sqlx::query_as::<_, ProductRow>(
                    r"
                    SELECT id, name, description, price, images, category_id,
                           created_at, updated_at
                    FROM products
                    WHERE category_id = $1
                    ORDER BY created_at DESC
                    ",
                )
                .bind(category_id.as_uuid())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductRow>(
                    r"
                    SELECT id, name, description, price, images, category_id,
                           created_at, updated_at
                    FROM products
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, images, category_id,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }
}
