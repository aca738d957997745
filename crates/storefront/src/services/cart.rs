//! Session-backed cart persistence.
//!
//! The cart itself ([`almacen_core::Cart`]) is pure and synchronous; this
//! module supplies its durability protocol. A [`CartStorage`] implementation
//! is a single session-scoped slot holding the serialized cart; the
//! [`CartStore`] wraps one and applies exactly one cart operation per call,
//! rewriting the whole snapshot after every mutation.
//!
//! A snapshot that is absent, unreadable, or malformed hydrates as the empty
//! cart - corruption is never fatal to a browsing session.

use std::future::Future;

use tower_sessions::Session;

use almacen_core::{Cart, CartError, CartItem, ProductSnapshot};

use crate::models::session::keys;

/// Errors from cart store operations.
#[derive(Debug, thiserror::Error)]
pub enum CartStoreError {
    /// The mutation was rejected before any state change.
    #[error(transparent)]
    Invalid(#[from] CartError),

    /// Writing the durable snapshot failed.
    #[error("cart storage error: {0}")]
    Storage(String),
}

/// A session-scoped key-value slot for the durable cart snapshot.
pub trait CartStorage: Send + Sync {
    /// Load the snapshot. `None` when absent, unreadable, or malformed.
    fn load(&self) -> impl Future<Output = Option<Cart>> + Send;

    /// Overwrite the snapshot with the given cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// The authoritative cart for one browsing session.
///
/// Each method loads the snapshot, applies a single cart operation, and
/// rewrites the snapshot wholesale, returning the resulting cart. A failed
/// save surfaces an error; the durable state is then whatever the previous
/// save left behind, never a partial write.
pub struct CartStore<S> {
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Wrap a storage slot.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The current cart, hydrated from storage.
    pub async fn get(&self) -> Cart {
        self.storage.load().await.unwrap_or_default()
    }

    /// Add `quantity` units of a product.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Invalid`] for a rejected snapshot (the cart
    /// and its durable state are untouched) or [`CartStoreError::Storage`]
    /// if the rewrite fails.
    pub async fn add(
        &self,
        snapshot: ProductSnapshot,
        quantity: u32,
    ) -> Result<Cart, CartStoreError> {
        let mut cart = self.get().await;
        cart.add(snapshot, quantity)?;
        self.storage.save(&cart).await?;
        Ok(cart)
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] if the rewrite fails.
    pub async fn set_quantity(&self, id: &str, quantity: u32) -> Result<Cart, CartStoreError> {
        let mut cart = self.get().await;
        cart.set_quantity(id, quantity);
        self.storage.save(&cart).await?;
        Ok(cart)
    }

    /// Remove a line. No-op (but still a rewrite) when absent.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] if the rewrite fails.
    pub async fn remove(&self, id: &str) -> Result<Cart, CartStoreError> {
        let mut cart = self.get().await;
        cart.remove(id);
        self.storage.save(&cart).await?;
        Ok(cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] if the rewrite fails.
    pub async fn clear(&self) -> Result<Cart, CartStoreError> {
        let mut cart = self.get().await;
        cart.clear();
        self.storage.save(&cart).await?;
        Ok(cart)
    }
}

/// Production storage: one key in the tower-sessions record.
#[derive(Clone)]
pub struct SessionCartStorage {
    session: Session,
}

impl SessionCartStorage {
    /// Wrap the request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStorage for SessionCartStorage {
    async fn load(&self) -> Option<Cart> {
        match self.session.get::<Vec<CartItem>>(keys::CART).await {
            Ok(Some(items)) => Some(Cart::from_items(items)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("discarding unreadable cart snapshot: {e}");
                None
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        self.session
            .insert(keys::CART, cart.items())
            .await
            .map_err(|e| CartStoreError::Storage(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;

    /// Test storage: the serialized snapshot in a mutex-guarded slot.
    #[derive(Default)]
    struct MemoryStorage {
        slot: Mutex<Option<String>>,
    }

    impl MemoryStorage {
        fn with_snapshot(raw: &str) -> Self {
            Self {
                slot: Mutex::new(Some(raw.to_string())),
            }
        }

        fn snapshot(&self) -> Option<String> {
            self.slot.lock().unwrap().clone()
        }
    }

    impl CartStorage for &MemoryStorage {
        async fn load(&self) -> Option<Cart> {
            let raw = self.slot.lock().unwrap().clone()?;
            match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(items) => Some(Cart::from_items(items)),
                Err(_) => None,
            }
        }

        async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
            let raw = serde_json::to_string(cart)
                .map_err(|e| CartStoreError::Storage(e.to_string()))?;
            *self.slot.lock().unwrap() = Some(raw);
            Ok(())
        }
    }

    fn snapshot(id: &str, price: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: price.parse().unwrap(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_fresh_session_starts_empty() {
        let storage = MemoryStorage::default();
        let store = CartStore::new(&storage);
        assert!(store.get().await.is_empty());
    }

    #[tokio::test]
    async fn test_mutation_rewrites_snapshot() {
        let storage = MemoryStorage::default();
        let store = CartStore::new(&storage);

        store.add(snapshot("p1", "10"), 2).await.unwrap();
        let raw = storage.snapshot().unwrap();
        let items: Vec<CartItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_hydrates_previous_snapshot() {
        let storage = MemoryStorage::default();
        {
            let store = CartStore::new(&storage);
            store.add(snapshot("p1", "10"), 1).await.unwrap();
        }

        // A later "request" over the same slot sees the same cart.
        let store = CartStore::new(&storage);
        let cart = store.get().await;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, "p1");
    }

    #[tokio::test]
    async fn test_malformed_snapshot_hydrates_empty() {
        let storage = MemoryStorage::with_snapshot("{not json[");
        let store = CartStore::new(&storage);
        assert!(store.get().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_add_leaves_snapshot_untouched() {
        let storage = MemoryStorage::default();
        let store = CartStore::new(&storage);
        store.add(snapshot("p1", "10"), 1).await.unwrap();
        let before = storage.snapshot();

        let result = store.add(snapshot("", "10"), 1).await;
        assert!(matches!(result, Err(CartStoreError::Invalid(_))));
        assert_eq!(storage.snapshot(), before);
    }

    #[tokio::test]
    async fn test_clear_persists_empty_array() {
        let storage = MemoryStorage::default();
        let store = CartStore::new(&storage);
        store.add(snapshot("p1", "10"), 1).await.unwrap();
        store.add(snapshot("p2", "20"), 2).await.unwrap();

        let cart = store.clear().await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(storage.snapshot().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes_and_persists() {
        let storage = MemoryStorage::default();
        let store = CartStore::new(&storage);
        store.add(snapshot("p1", "10"), 3).await.unwrap();

        let cart = store.set_quantity("p1", 0).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(storage.snapshot().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let storage = MemoryStorage::default();
        let store = CartStore::new(&storage);
        store.add(snapshot("p1", "10"), 1).await.unwrap();

        let cart = store.remove("nope").await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Decimal::from(10));
    }
}
