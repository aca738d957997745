//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth
//! POST /auth/login             - Login with email + password
//! POST /auth/logout            - Logout
//!
//! # Products (reads: any admin; writes: admin or super_admin)
//! GET    /api/products
//! POST   /api/products
//! GET    /api/products/{id}
//! PUT    /api/products/{id}
//! DELETE /api/products/{id}
//!
//! # Categories (same role gates as products)
//! GET    /api/categories
//! POST   /api/categories
//! GET    /api/categories/{id}
//! PUT    /api/categories/{id}
//! DELETE /api/categories/{id}
//!
//! # Orders
//! GET    /api/orders           - List with embedded line items
//! GET    /api/orders/{id}
//! PUT    /api/orders/{id}      - Status-only update
//! DELETE /api/orders/{id}      - Permanently disabled (405)
//!
//! # Settings
//! GET  /api/settings
//! PUT  /api/settings           - Single-row upsert
//!
//! # Admin users (super_admin only)
//! GET  /api/users
//! ```

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route(
            "/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::destroy),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/", get(orders::index)).route(
        "/{id}",
        get(orders::show)
            .put(orders::update)
            .delete(orders::destroy),
    )
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api/products", product_routes())
        .nest("/api/categories", category_routes())
        .nest("/api/orders", order_routes())
        .route(
            "/api/settings",
            get(settings::show).put(settings::update),
        )
        .route("/api/users", get(users::index))
}
