//! Graceful shutdown signal handling.

/// Wait for the shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
