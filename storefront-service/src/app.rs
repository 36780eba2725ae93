use std::sync::Arc;

use axum::extract::{FromRef, State};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use common_auth::{JwtConfig, JwtVerifier};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::error;

use crate::config::AppConfig;
use crate::dashboard::DashboardQueries;
use crate::metrics::ApiMetrics;
use crate::order_store::OrderStore;
use crate::product_store::ProductStore;
use crate::tokens::{TokenConfig, TokenSigner};
use crate::user_store::UserStore;
use crate::{dashboard_handlers, order_handlers, product_handlers, user_handlers};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub users: UserStore,
    pub orders: OrderStore,
    pub products: ProductStore,
    pub dashboard: DashboardQueries,
    pub token_signer: Arc<TokenSigner>,
    pub jwt_verifier: Arc<JwtVerifier>,
    pub config: Arc<AppConfig>,
    pub metrics: Arc<ApiMetrics>,
}

impl FromRef<AppState> for Arc<JwtVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_verifier.clone()
    }
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig) -> anyhow::Result<Self> {
        let jwt_verifier = JwtVerifier::new(
            JwtConfig::new(config.token_issuer.clone()),
            config.token_secret.as_bytes(),
        );
        let token_signer = TokenSigner::new(TokenConfig {
            secret: config.token_secret.clone(),
            issuer: config.token_issuer.clone(),
        });

        Ok(Self {
            users: UserStore::new(db.clone(), config.pepper.clone(), config.hash_cost),
            orders: OrderStore::new(db.clone()),
            products: ProductStore::new(db.clone()),
            dashboard: DashboardQueries::new(db.clone()),
            token_signer: Arc::new(token_signer),
            jwt_verifier: Arc::new(jwt_verifier),
            metrics: Arc::new(ApiMetrics::new()?),
            config: Arc::new(config),
            db,
        })
    }
}

pub async fn health() -> &'static str {
    "ok"
}

async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let allowed_origins = [
        "http://localhost:3000",
        "http://localhost:3001",
        "http://localhost:5173",
    ];
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect::<Vec<_>>(),
        ))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static("authorization"),
        ]);

    Router::new()
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/authenticate", post(user_handlers::authenticate))
        .route(
            "/users",
            post(user_handlers::create_user)
                .get(user_handlers::list_users)
                .delete(user_handlers::remove_user),
        )
        .route("/users/:username", get(user_handlers::get_user))
        .route(
            "/api/dashboard/user_active_order/:id",
            get(dashboard_handlers::user_active_order),
        )
        .route(
            "/api/dashboard/user_completed_orders/:id",
            get(dashboard_handlers::user_completed_orders),
        )
        .route(
            "/orders",
            post(order_handlers::create_order).get(order_handlers::list_orders),
        )
        .route("/orders/:order_id", delete(order_handlers::delete_order))
        .route(
            "/orders/:order_id/products",
            post(order_handlers::add_product),
        )
        .route(
            "/products",
            post(product_handlers::create_product).get(product_handlers::list_products),
        )
        .route("/products/:product_id", get(product_handlers::get_product))
        .with_state(state)
        .layer(cors)
}
