use anyhow::Context;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use timeo::shared::core::clock::SystemClock;
use timeo::shared::infrastructure::store::sqlite::{Database, SqliteStore};
use timeo::shell::config::AppConfig;
use timeo::shell::http::router;
use timeo::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;

    let database = Database::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    database
        .run_migrations()
        .await
        .context("failed to apply migrations")?;

    let store = Arc::new(SqliteStore::new(database.pool().clone()));
    let state = AppState::new(store, Arc::new(SystemClock));
    let refresher = state.refresher.clone();

    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("HTTP endpoint: http://{}", config.bind_addr);
    info!("GraphQL endpoint: http://{}/gql", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("waiting for background goal refreshes");
    refresher.drain().await;
    database.pool().close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
