use axum::extract::{Path, State};
use axum::Json;
use common_auth::AuthContext;
use serde::Deserialize;

use crate::api_error::ApiError;
use crate::app::AppState;
use crate::order_store::{Order, OrderProduct, OrderStatus};

#[derive(Deserialize)]
pub struct NewOrder {
    pub status: OrderStatus,
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct NewOrderProduct {
    pub product_id: i64,
    pub quantity: i32,
}

pub async fn list_orders(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.list().await?;
    Ok(Json(orders))
}

pub async fn create_order(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(new_order): Json<NewOrder>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .orders
        .create(new_order.status, new_order.user_id)
        .await?;
    Ok(Json(order))
}

pub async fn delete_order(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(order_id): Path<i64>,
) -> Result<Json<Option<Order>>, ApiError> {
    let removed = state.orders.delete(order_id).await?;
    Ok(Json(removed))
}

pub async fn add_product(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(order_id): Path<i64>,
    Json(line): Json<NewOrderProduct>,
) -> Result<Json<OrderProduct>, ApiError> {
    let order_product = state
        .orders
        .add_product(order_id, line.product_id, line.quantity)
        .await?;
    Ok(Json(order_product))
}
