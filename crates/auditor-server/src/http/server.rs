//! Listener startup and graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;

use super::AppState;
use super::router;
use crate::ServerConfig;

/// Binds `config.port` on all interfaces and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %addr,
        extract_dir = %config.extract_dir.display(),
        max_upload_mb = config.max_upload_bytes / 1024 / 1024,
        max_files = config.extraction.max_file_count,
        max_walk_depth = config.walk.max_depth,
        "server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received terminate signal"),
    }

    tracing::info!("shutting down");
}
