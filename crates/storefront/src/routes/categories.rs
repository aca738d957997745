//! Category route handlers (public reads).

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use almacen_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::models::Category;
use crate::state::AppState;

/// List categories.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Show a single category.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>> {
    CategoryRepository::new(state.pool())
        .get_by_id(CategoryId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))
}
