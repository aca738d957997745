//! Session-related types.

/// Session keys for storefront state.
pub mod keys {
    /// Key holding the serialized shopping cart (a JSON array of line items).
    pub const CART: &str = "shopping_cart";
}
