use std::net::SocketAddr;

use sqlx::PgPool;
use tokio::net::TcpListener;

use storefront_service::app::{build_router, AppState};
use storefront_service::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db = PgPool::connect(&config.database_url).await?;
    // Ensure database schema is up to date before serving traffic
    sqlx::migrate!("./migrations").run(&db).await?;

    let host = config.host.clone();
    let port = config.port;

    let state = AppState::new(db, config)?;
    let app = build_router(state);

    let ip: std::net::IpAddr = host.parse()?;
    let addr = SocketAddr::from((ip, port));
    println!("starting storefront-service on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
