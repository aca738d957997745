//! Category administration route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use almacen_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireStoreWrite};
use crate::models::Category;
use crate::models::catalog::CategoryData;
use crate::routes::products::DeletedResponse;
use crate::state::AppState;

/// Request body for creating or replacing a category.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryPayload {
    fn validate(self) -> Result<CategoryData> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Missing required field: name".to_string(),
            ));
        }

        Ok(CategoryData {
            name: self.name.trim().to_string(),
            description: self.description,
        })
    }
}

/// List all categories.
#[instrument(skip(state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Show a single category.
#[instrument(skip(state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>> {
    CategoryRepository::new(state.pool())
        .get_by_id(CategoryId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))
}

/// Create a category.
#[instrument(skip(state, payload))]
pub async fn create(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>)> {
    let data = payload.validate()?;
    let category = CategoryRepository::new(state.pool()).create(&data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Replace a category's editable fields.
#[instrument(skip(state, payload))]
pub async fn update(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    let data = payload.validate()?;
    CategoryRepository::new(state.pool())
        .update(CategoryId::new(id), &data)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))
}

/// Delete a category.
#[instrument(skip(state))]
pub async fn destroy(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>> {
    CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;

    Ok(Json(DeletedResponse {
        message: "Category deleted successfully".to_string(),
    }))
}
