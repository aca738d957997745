//! Cart route handlers.
//!
//! Every mutating route loads the session cart, applies exactly one cart
//! operation, rewrites the durable snapshot, and returns the resulting cart.

use axum::{
    Json,
    extract::State,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use almacen_core::{Cart, CartItem, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::services::cart::{CartStore, SessionCartStorage};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            quantity: item.quantity,
            line_total: item.line_total(),
        }
    }
}

/// Cart display data with aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Decimal,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Serialize)]
pub struct CartCountView {
    pub item_count: u64,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub id: String,
    /// May arrive negative from the client; floored at zero.
    pub quantity: i64,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: String,
}

fn store_for(session: Session) -> CartStore<SessionCartStorage> {
    CartStore::new(SessionCartStorage::new(session))
}

/// Show the current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    let cart = store_for(session).get().await;
    Json(CartView::from(&cart))
}

/// Add a product to the cart.
///
/// The product is looked up in the catalog and its name, price, and primary
/// image are snapshotted into the cart line.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(request.product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let cart = store_for(session)
        .add(product.snapshot(), request.quantity.unwrap_or(1))
        .await?;
    Ok(Json(CartView::from(&cart)))
}

/// Set a line's quantity. Zero (or negative input) removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = u32::try_from(request.quantity.max(0)).unwrap_or(u32::MAX);
    let cart = store_for(session).set_quantity(&request.id, quantity).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Remove a line from the cart. No-op when the id is absent.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let cart = store_for(session).remove(&request.id).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let cart = store_for(session).clear().await?;
    Ok(Json(CartView::from(&cart)))
}

/// Item count for the cart badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCountView> {
    let cart = store_for(session).get().await;
    Json(CartCountView {
        item_count: cart.item_count(),
    })
}
