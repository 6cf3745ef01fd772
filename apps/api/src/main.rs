mod config;
mod db;
mod errors;
mod extract;
mod models;
mod routes;
mod state;
mod students;

use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Students API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config).await?;
    run_migrations(&db).await?;

    let state = AppState { db: db.clone() };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Students API shut down");
    Ok(())
}

fn default_filter(config: &Config) -> EnvFilter {
    let mut directives = format!("{}={}", env!("CARGO_CRATE_NAME"), config.rust_log);
    directives.push_str(",tower_http=debug");
    if config.sql_echo {
        directives.push_str(",sqlx::query=debug");
    }
    EnvFilter::new(directives)
}

/// Wait for ctrl-c signal for graceful shutdown.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal");
}
