//! an-server: HTTP API for the annotation client.
//!
//! This crate wraps the stores from `an-core` in an Axum application:
//!
//! - Image listing and static file serving for the browser client
//! - Upload endpoints for binary masks and masked images
//! - The prediction endpoint backed by the indexed record store
//! - Graceful shutdown via signal handling or a cancellation token

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use std::net::SocketAddr;

use an_core::config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

/// Start the annotation server.
///
/// Validates the configuration, binds the configured address, and serves
/// until SIGINT or SIGTERM.
pub async fn start(config: Config) -> an_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    log_input_images(&config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| an_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| an_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, AppContext::new(config), CancellationToken::new()).await
}

/// Serve the application on an already-bound listener until a shutdown
/// signal arrives or `cancel` is triggered.
pub async fn serve(
    listener: TcpListener,
    ctx: AppContext,
    cancel: CancellationToken,
) -> an_core::Result<()> {
    let addr = listener.local_addr()?;
    let app = router::build_router(ctx);

    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn log_input_images(config: &Config) {
    let storage = &config.storage;
    match an_core::images::list_images(&storage.input_dir, &storage.image_extensions) {
        Ok(images) => tracing::info!(
            "Found {} images in {}",
            images.len(),
            storage.input_dir.display()
        ),
        Err(e) => tracing::warn!(
            "Failed to list images in {}: {e}",
            storage.input_dir.display()
        ),
    }
}

/// Wait for a shutdown signal (SIGINT, SIGTERM, or cancellation).
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
