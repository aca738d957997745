//! Order domain types for the admin panel.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use almacen_core::{Email, OrderId, OrderItemId, OrderStatus, ProductId};

/// An order with its line items embedded, as shown in the order list and
/// detail views.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: Email,
    pub shipping_address: String,
    pub total: Decimal,
    pub status: OrderStatus,
    pub preference_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}
