use axum::extract::{Path, State};
use axum::Json;
use common_auth::AuthContext;

use crate::api_error::ApiError;
use crate::app::AppState;
use crate::order_store::Order;

pub async fn user_active_order(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.dashboard.user_active_order(id).await?;
    Ok(Json(orders))
}

pub async fn user_completed_orders(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.dashboard.user_completed_orders(id).await?;
    Ok(Json(orders))
}
