use std::sync::Arc;

use storefront_api::app::{app, AppState};
use storefront_api::config;
use storefront_api::database::{manager, PgStore};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Storefront API in {:?} mode", config.environment);

    let pool = manager::connect_pool()
        .await
        .unwrap_or_else(|e| panic!("failed to connect database: {}", e));

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let router = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Storefront API listening on http://{}", bind_addr);

    axum::serve(listener, router).await.expect("server");
}
