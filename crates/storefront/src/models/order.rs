//! Order domain types.
//!
//! The storefront only ever creates orders (at checkout); listing and
//! managing them is the admin binary's job, so the types here describe a
//! new order, not a stored one.

use rust_decimal::Decimal;

use almacen_core::{Email, ProductId};

/// Data needed to create an order at checkout.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: Email,
    pub shipping_address: String,
    pub total: Decimal,
    pub items: Vec<NewOrderItem>,
}

/// One line of a new order, snapshotted from the cart.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}
