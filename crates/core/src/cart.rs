//! The shopping cart and its line items.
//!
//! A [`Cart`] belongs to exactly one browsing session and is mutated
//! synchronously within a single request. All operations are total over
//! well-formed input; the only hard invariants are:
//!
//! - every line item has `quantity >= 1` (an item driven to zero is removed,
//!   never kept around),
//! - item ids are unique within the cart (adding an existing id accumulates
//!   quantity instead of duplicating the entry),
//! - `name`, `price`, and `image` are snapshots taken when the item is first
//!   added - later catalog changes never touch items already in a cart.
//!
//! The cart serializes as a plain JSON array of line items, which is also the
//! durable snapshot format used by the storefront's session storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error adding an item to a cart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// The product snapshot had an empty id.
    #[error("cart item id cannot be empty")]
    EmptyId,
    /// The product snapshot had a negative unit price.
    #[error("cart item price cannot be negative")]
    NegativePrice,
}

/// Catalog data captured at add-to-cart time.
///
/// This is the cart's view of a product: identity plus the display fields
/// frozen at the moment the customer added it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Opaque product identifier.
    pub id: String,
    /// Display name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Optional display image reference.
    pub image: Option<String>,
}

/// One product line in a shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Opaque product identifier, unique within the cart.
    pub id: String,
    /// Display name snapshot.
    pub name: String,
    /// Unit price snapshot.
    pub price: Decimal,
    /// Optional display image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An ordered collection of [`CartItem`]s keyed by product id.
///
/// Insertion order is preserved for display. The default value is the empty
/// cart a session starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from a previously serialized snapshot.
    ///
    /// Items that violate the quantity invariant (a hand-edited or corrupt
    /// snapshot could contain them) are dropped rather than rejected, so a
    /// bad snapshot degrades to a smaller cart instead of a failed hydration.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 || item.id.is_empty() {
                continue;
            }
            match cart.entry_mut(&item.id) {
                Some(existing) => existing.quantity += item.quantity,
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// If an item with the same id already exists its quantity is incremented
    /// and the stored snapshot is left untouched; otherwise a new line is
    /// appended at the end. A `quantity` of zero is treated as one, matching
    /// the "add defaults to a single unit" contract.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyId`] or [`CartError::NegativePrice`] without
    /// mutating the cart.
    pub fn add(&mut self, snapshot: ProductSnapshot, quantity: u32) -> Result<(), CartError> {
        if snapshot.id.is_empty() {
            return Err(CartError::EmptyId);
        }
        if snapshot.price.is_sign_negative() && !snapshot.price.is_zero() {
            return Err(CartError::NegativePrice);
        }

        let quantity = quantity.max(1);
        match self.entry_mut(&snapshot.id) {
            Some(existing) => existing.quantity += quantity,
            None => self.items.push(CartItem {
                id: snapshot.id,
                name: snapshot.name,
                price: snapshot.price,
                image: snapshot.image,
                quantity,
            }),
        }
        Ok(())
    }

    /// Remove the line with the given id. No-op if absent.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Set a line's quantity, removing the line when it reaches zero.
    ///
    /// No-op if the id is not present. Callers are responsible for flooring
    /// negative wire input at zero before calling.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(item) = self.entry_mut(id) {
            item.quantity = quantity;
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over all lines, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn snapshot(id: &str, price: Decimal) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            name: format!("Product {id}"),
            price,
            image: None,
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_accumulates_same_id() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 2).unwrap();
        cart.add(snapshot("p1", d("10")), 3).unwrap();
        cart.add(snapshot("p1", d("10")), 1).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 6);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_add_preserves_first_snapshot() {
        // Add p1 at $10 x2, then again at $99 x1: quantity accumulates but
        // the first price snapshot wins.
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 2).unwrap();
        let mut repriced = snapshot("p1", d("99"));
        repriced.name = "Renamed".to_string();
        cart.add(repriced, 1).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[0].price, d("10"));
        assert_eq!(cart.items()[0].name, "Product p1");
        assert_eq!(cart.total(), d("30"));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(snapshot("b", d("1")), 1).unwrap();
        cart.add(snapshot("a", d("1")), 1).unwrap();
        cart.add(snapshot("b", d("1")), 1).unwrap();
        cart.add(snapshot("c", d("1")), 1).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_add_zero_quantity_means_one() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("5")), 0).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_add_empty_id_rejected() {
        let mut cart = Cart::new();
        let err = cart.add(snapshot("", d("5")), 1).unwrap_err();
        assert_eq!(err, CartError::EmptyId);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_negative_price_rejected() {
        let mut cart = Cart::new();
        let err = cart.add(snapshot("p1", d("-1")), 1).unwrap_err();
        assert_eq!(err, CartError::NegativePrice);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 1).unwrap();
        let before = cart.clone();

        cart.remove("nope");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 1).unwrap();
        cart.set_quantity("p1", 5);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total(), d("50"));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 3).unwrap();
        cart.set_quantity("p1", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 1).unwrap();
        let before = cart.clone();

        cart.set_quantity("nope", 7);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_recomputed_after_mutations() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10.50")), 2).unwrap();
        cart.add(snapshot("p2", d("3.25")), 4).unwrap();
        assert_eq!(cart.total(), d("34.00"));

        cart.set_quantity("p2", 1);
        assert_eq!(cart.total(), d("24.25"));

        cart.remove("p1");
        assert_eq!(cart.total(), d("3.25"));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 1).unwrap();
        cart.add(snapshot("p2", d("20")), 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);

        // The durable snapshot of a cleared cart is an empty JSON array.
        assert_eq!(serde_json::to_string(&cart).unwrap(), "[]");
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(
            ProductSnapshot {
                id: "p1".to_string(),
                name: "Yerba Mate 1kg".to_string(),
                price: d("4500.00"),
                image: Some("https://cdn.example.com/yerba.jpg".to_string()),
            },
            2,
        )
        .unwrap();
        cart.add(snapshot("p2", d("120.75")), 1).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_serializes_as_item_array() {
        let mut cart = Cart::new();
        cart.add(snapshot("p1", d("10")), 2).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], "p1");
        assert_eq!(items[0]["quantity"], 2);
    }

    #[test]
    fn test_from_items_drops_invalid_lines() {
        let items = vec![
            CartItem {
                id: "p1".to_string(),
                name: "ok".to_string(),
                price: d("10"),
                image: None,
                quantity: 2,
            },
            CartItem {
                id: String::new(),
                name: "no id".to_string(),
                price: d("10"),
                image: None,
                quantity: 1,
            },
            CartItem {
                id: "p2".to_string(),
                name: "zero qty".to_string(),
                price: d("10"),
                image: None,
                quantity: 0,
            },
        ];

        let cart = Cart::from_items(items);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, "p1");
    }

    #[test]
    fn test_from_items_merges_duplicate_ids() {
        let line = CartItem {
            id: "p1".to_string(),
            name: "dup".to_string(),
            price: d("10"),
            image: None,
            quantity: 2,
        };
        let cart = Cart::from_items(vec![line.clone(), line]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 4);
    }
}
