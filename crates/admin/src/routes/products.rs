//! Product administration route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use almacen_core::{CategoryId, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireStoreWrite};
use crate::models::Product;
use crate::models::catalog::ProductData;
use crate::state::AppState;

/// Request body for creating or replacing a product.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: Option<Uuid>,
}

impl ProductPayload {
    fn validate(self) -> Result<ProductData> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Missing required field: name".to_string(),
            ));
        }
        if self.price.is_sign_negative() {
            return Err(AppError::BadRequest(
                "Price must not be negative".to_string(),
            ));
        }

        Ok(ProductData {
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            images: self.images,
            category_id: self.category_id.map(CategoryId::new),
        })
    }
}

/// Message response for deletions.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// List all products.
#[instrument(skip(state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Create a product.
#[instrument(skip(state, payload))]
pub async fn create(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>)> {
    let data = payload.validate()?;
    let product = ProductRepository::new(state.pool()).create(&data).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's editable fields.
#[instrument(skip(state, payload))]
pub async fn update(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    let data = payload.validate()?;
    ProductRepository::new(state.pool())
        .update(ProductId::new(id), &data)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn destroy(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    Ok(Json(DeletedResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
