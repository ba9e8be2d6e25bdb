use anyhow::{Context, Result};
use htoj::{
    cache::Cache,
    config::Config,
    db::Database,
    i18n::Bundle,
    web::{self, AppState},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("htoj=info".parse()?),
        )
        .init();

    info!("Starting HTOJ");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Step 1: Relational store
    let db = Database::connect(&config.database).await?;
    db.migrate().await?;

    // Step 2: Key-value cache
    let cache = Cache::connect(&config.cache).await?;

    // Step 3: Locale files
    let bundle = Bundle::load_dir(&config.locales_dir, config.default_language.as_str())
        .with_context(|| format!("Failed to load locales from {}", config.locales_dir.display()))?;

    let state = AppState::new(Arc::new(bundle))
        .with_cookie_secure(config.cookie_secure)
        .with_database(db.clone())
        .with_cache(cache);

    let app = web::router_with_assets(state, &config.public_dir);

    let address = config.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("✓ Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
