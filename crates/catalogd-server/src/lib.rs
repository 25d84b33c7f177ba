//! catalogd-server: the HTTP API server.
//!
//! This crate ties the other catalogd crates into a running application:
//!
//! - Axum-based HTTP API for the item catalog
//! - Content-addressed image store backing the upload and serving paths
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod images;
pub mod router;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use catalogd_core::config::Config;

use crate::context::AppContext;
use crate::images::ImageStore;

/// Start the catalogd server.
///
/// This is the main entry point. It initializes the database and image
/// store, constructs the [`AppContext`], and serves the HTTP API until a
/// shutdown signal is received.
pub async fn start(config: Config) -> catalogd_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    // Initialize database.
    let db_path = &config.storage.db_path;
    let existed = db_path.exists();
    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }
    let db_str = db_path.to_string_lossy();
    let db = catalogd_db::pool::init_pool(&db_str)?;
    if existed {
        tracing::info!("Database opened (existing) at {db_str}");
    } else {
        tracing::info!("Database created (new) at {db_str}");
    }

    // Initialize image store (directory plus the default placeholder).
    let images = ImageStore::new(config.storage.image_dir.clone());
    images.init()?;
    tracing::info!("Image store at {}", config.storage.image_dir.display());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| catalogd_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let ctx = AppContext {
        db,
        images: Arc::new(images),
        config: Arc::new(config),
    };

    let app = router::build_router(ctx);

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| catalogd_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
