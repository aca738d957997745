//! Order administration route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use almacen_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireStoreWrite};
use crate::models::Order;
use crate::state::AppState;

/// Request body for updating an order. Status is the only mutable field.
#[derive(Debug, Deserialize)]
pub struct OrderUpdateRequest {
    pub status: String,
}

/// List all orders with embedded line items, newest first.
#[instrument(skip(state))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Show a single order with its items.
#[instrument(skip(state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Update an order's status.
///
/// Only values of the fixed status enumeration are accepted.
#[instrument(skip(state))]
pub async fn update(
    RequireStoreWrite(_admin): RequireStoreWrite,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<OrderUpdateRequest>,
) -> Result<Json<Order>> {
    let status = request
        .status
        .parse::<OrderStatus>()
        .map_err(|_| AppError::BadRequest("Invalid status value".to_string()))?;

    let order_id = OrderId::new(id);
    let repository = OrderRepository::new(state.pool());
    repository.update_status(order_id, status).await?;

    repository
        .get_by_id(order_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Order deletion is permanently disabled.
///
/// Cancel orders instead of deleting them so the record survives for
/// accounting and customer support.
#[instrument]
pub async fn destroy(
    RequireStoreWrite(_admin): RequireStoreWrite,
    Path(_id): Path<Uuid>,
) -> Result<Json<Order>> {
    Err(AppError::MethodNotAllowed(
        "Deleting orders is not permitted. Consider cancelling instead.".to_string(),
    ))
}
