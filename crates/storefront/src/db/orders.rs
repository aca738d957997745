//! Order repository for checkout writes.

use sqlx::PgPool;
use uuid::Uuid;

use almacen_core::{OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::NewOrder;

/// Repository for order creation at checkout.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order and its line items in one transaction.
    ///
    /// The order starts in `pending` status; the caller links it to the
    /// payment preference afterwards via [`Self::set_preference_id`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// committed in that case.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r"
            INSERT INTO orders (customer_name, customer_email, shipping_address, total, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&order.customer_name)
        .bind(order.customer_email.as_str())
        .bind(&order.shipping_address)
        .bind(order.total)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, product_name, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(order_id)
            .bind(item.product_id.as_uuid())
            .bind(&item.product_name)
            .bind(item.unit_price)
            .bind(i64::from(item.quantity))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderId::new(order_id))
    }

    /// Record the payment preference ID returned by the gateway.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist,
    /// `RepositoryError::Database` if the query fails.
    pub async fn set_preference_id(
        &self,
        id: OrderId,
        preference_id: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET preference_id = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .bind(preference_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
