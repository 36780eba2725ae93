use sqlx::PgPool;

use crate::order_store::{Order, OrderStatus};

/// Read-only filtered queries over orders backing the dashboard views.
#[derive(Clone)]
pub struct DashboardQueries {
    pool: PgPool,
}

impl DashboardQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Orders with status 'active' for a given user.
    pub async fn user_active_order(&self, user_id: i64) -> Result<Vec<Order>, sqlx::Error> {
        self.orders_with_status(user_id, OrderStatus::Active).await
    }

    /// Orders with status 'complete' for a given user.
    pub async fn user_completed_orders(&self, user_id: i64) -> Result<Vec<Order>, sqlx::Error> {
        self.orders_with_status(user_id, OrderStatus::Complete).await
    }

    async fn orders_with_status(
        &self,
        user_id: i64,
        status: OrderStatus,
    ) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "SELECT id, status, user_id FROM orders
             WHERE user_id = $1 AND status = $2 ORDER BY id",
        )
        .bind(user_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
    }
}
