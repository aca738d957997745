//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::mercadopago::{MercadoPagoClient, MercadoPagoError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    mercadopago: MercadoPagoClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Mercado Pago client cannot be built from the
    /// configured access token.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, MercadoPagoError> {
        let mercadopago = MercadoPagoClient::new(&config.mercadopago)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                mercadopago,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Mercado Pago client.
    #[must_use]
    pub fn mercadopago(&self) -> &MercadoPagoClient {
        &self.inner.mercadopago
    }
}
