//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Catalog (public reads)
//! GET  /products               - Product listing (?category=<uuid>)
//! GET  /products/{id}          - Product detail
//! GET  /categories             - Category listing
//! GET  /categories/{id}        - Category detail
//!
//! # Cart (session-backed)
//! GET  /cart                   - Cart snapshot with totals
//! POST /cart/items             - Add a product to the cart
//! POST /cart/update            - Set a line's quantity (0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Item count only
//!
//! # Checkout
//! POST /checkout               - Create order + payment preference
//! GET  /order-confirmation     - Landing target for gateway back URLs
//! POST /webhooks/mercadopago   - Payment notification receiver
//! ```

pub mod cart;
pub mod categories;
pub mod checkout;
pub mod products;
pub mod webhooks;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{id}", get(categories::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog routes
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(checkout::create))
        .route("/order-confirmation", get(checkout::confirmation))
        // Payment notifications
        .route("/webhooks/mercadopago", post(webhooks::mercadopago))
}
