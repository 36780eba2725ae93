use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// Order lifecycle states the dashboard filters on. Persisted as plain text
/// so new states can appear without a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
    Complete,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "active",
            OrderStatus::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub status: String,
    pub user_id: i64,
}

/// Line item tying a product and quantity to an order.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderProduct {
    pub id: i64,
    pub quantity: i32,
    pub order_id: i64,
    pub product_id: i64,
}

#[derive(Clone)]
pub struct OrderStore {
    pool: PgPool,
}

impl OrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT id, status, user_id FROM orders ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn create(&self, status: OrderStatus, user_id: i64) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "INSERT INTO orders (status, user_id) VALUES ($1, $2)
             RETURNING id, status, user_id",
        )
        .bind(status.as_str())
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Removes an order by id, returning the removed row or `None`.
    pub async fn delete(&self, id: i64) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            "DELETE FROM orders WHERE id = $1 RETURNING id, status, user_id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn add_product(
        &self,
        order_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<OrderProduct, sqlx::Error> {
        sqlx::query_as::<_, OrderProduct>(
            "INSERT INTO order_products (quantity, order_id, product_id)
             VALUES ($1, $2, $3)
             RETURNING id, quantity, order_id, product_id",
        )
        .bind(quantity)
        .bind(order_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
    }
}
