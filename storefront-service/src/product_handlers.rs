use axum::extract::{Path, State};
use axum::Json;
use common_auth::AuthContext;

use crate::api_error::ApiError;
use crate::app::AppState;
use crate::product_store::{NewProduct, Product};

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.list().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<Option<Product>>, ApiError> {
    let product = state.products.get(product_id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(new_product): Json<NewProduct>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.create(new_product).await?;
    Ok(Json(product))
}
