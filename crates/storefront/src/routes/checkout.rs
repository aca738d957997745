//! Checkout route handlers.
//!
//! Checkout validates payer details and the session cart, records a pending
//! order with line-item snapshots, then asks Mercado Pago for a checkout
//! preference. The browser is redirected to the returned `init_point`; the
//! cart is cleared by the client only after the payment concludes.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use almacen_core::{Email, OrderId, ProductId};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::{NewOrder, NewOrderItem};
use crate::services::cart::{CartStore, SessionCartStorage};
use crate::services::mercadopago::{
    BackUrls, PreferenceItem, PreferencePayer, PreferenceRequest, split_payer_name,
};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Customer's full name.
    pub name: String,
    /// Customer's email address.
    pub email: String,
    /// Free-form shipping address.
    pub shipping_address: String,
}

/// Checkout response: where to send the browser.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub preference_id: String,
    pub init_point: String,
}

/// Create an order and a payment preference from the session cart.
#[instrument(skip(state, session, request))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let cart = CartStore::new(SessionCartStorage::new(session)).get().await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty".to_string()));
    }

    let name = request.name.trim();
    let shipping_address = request.shipping_address.trim();
    if name.is_empty() || shipping_address.is_empty() {
        return Err(AppError::BadRequest(
            "Please fill in all required fields".to_string(),
        ));
    }
    let email = Email::parse(request.email.trim())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Order lines are snapshots of the cart, not re-reads of the catalog.
    let mut items = Vec::with_capacity(cart.len());
    for line in cart.items() {
        let product_id = line.id.parse::<ProductId>().map_err(|_| {
            AppError::BadRequest(format!("unknown product in cart: {}", line.id))
        })?;
        items.push(NewOrderItem {
            product_id,
            product_name: line.name.clone(),
            unit_price: line.price,
            quantity: line.quantity,
        });
    }

    let new_order = NewOrder {
        customer_name: name.to_string(),
        customer_email: email.clone(),
        shipping_address: shipping_address.to_string(),
        total: cart.total(),
        items,
    };

    let orders = OrderRepository::new(state.pool());
    let order_id = orders.create(&new_order).await?;

    let base_url = state.config().base_url.trim_end_matches('/');
    let currency = state.config().mercadopago.currency;
    let (first_name, surname) = split_payer_name(name);

    let preference = PreferenceRequest {
        items: cart
            .items()
            .iter()
            .map(|line| PreferenceItem {
                id: line.id.clone(),
                title: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.price,
                currency_id: currency.code().to_string(),
            })
            .collect(),
        payer: PreferencePayer {
            name: first_name,
            surname,
            email: email.into_inner(),
        },
        back_urls: BackUrls::for_base_url(base_url),
        auto_return: "approved".to_string(),
        notification_url: format!("{base_url}/webhooks/mercadopago"),
        external_reference: order_id.to_string(),
    };

    let response = state.mercadopago().create_preference(&preference).await?;
    orders.set_preference_id(order_id, &response.id).await?;

    tracing::info!(%order_id, preference_id = %response.id, "checkout preference created");

    Ok(Json(CheckoutResponse {
        order_id,
        preference_id: response.id,
        init_point: response.init_point,
    }))
}

/// Query parameters appended by the gateway's back URLs.
#[derive(Debug, Deserialize)]
pub struct ConfirmationQuery {
    pub status: Option<String>,
}

/// Confirmation echo.
#[derive(Debug, Serialize)]
pub struct ConfirmationView {
    pub status: String,
}

/// Landing target for the gateway's back URLs.
///
/// Purely informational; order state transitions happen through the admin
/// API and payment notifications, never from redirect query parameters.
#[instrument]
pub async fn confirmation(Query(query): Query<ConfirmationQuery>) -> Json<ConfirmationView> {
    Json(ConfirmationView {
        status: query.status.unwrap_or_else(|| "unknown".to_string()),
    })
}
