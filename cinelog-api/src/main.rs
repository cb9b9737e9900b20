//! # Cinelog API Server
//!
//! Serves the Cinelog HTTP API and the static front-end from one process.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment (and `.env`)
//! 2. Open the PostgreSQL pool and create the schema if missing
//! 3. Build the router and serve until Ctrl-C / SIGTERM
//! 4. Close the pool
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p cinelog-api
//! ```

use cinelog_api::{
    app::{build_router, AppState},
    config::Config,
};
use cinelog_shared::{
    db::{pool, schema},
    store::{PgStore, Store},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Cinelog API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    schema::ensure_schema(&db).await?;

    let store: Arc<dyn Store> = Arc::new(PgStore::new(db.clone()));
    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, config))?;

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, closing database pool...");
    pool::close_pool(db).await;

    Ok(())
}

/// Installs the tracing subscriber; `LOG_FORMAT=json` selects JSON lines
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cinelog_api=debug,cinelog_shared=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
