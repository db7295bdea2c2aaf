//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
    create_group, current_event, debug_start_event, debug_update_user, debug_warn_user,
    get_groups, health_check, validate_token, websocket_handler,
};
use crate::signal::shutdown_signal;
use crate::state::AppState;

/// Build the router of the stand-in backend.
///
/// Exposed separately from [`run_server`] so integration tests can serve
/// the app in-process on an ephemeral port.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Channel endpoint
        .route("/ws", get(websocket_handler))
        // REST endpoints
        .route("/api/health", get(health_check))
        .route("/auth/validateToken", post(validate_token))
        .route("/api/events/current", get(current_event))
        .route("/api/groups", get(get_groups).post(create_group))
        // Injection endpoints for development and tests
        .route("/debug/users/update", post(debug_update_user))
        .route("/debug/users/{id}/warn", post(debug_warn_user))
        .route("/debug/event/start", post(debug_start_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the app on an already bound listener.
///
/// Integration tests bind port 0 themselves and run the server as a task.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: Arc<AppState>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

/// Run the stand-in backend.
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 8080)
/// * `start_in_secs` - Offset of the seeded event start relative to now
pub async fn run_server(
    host: String,
    port: u16,
    start_in_secs: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(crate::seed::demo_state(start_in_secs));
    let app = app(state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Terakoya dev server listening on {}", listener.local_addr()?);
    tracing::info!("Channel endpoint: ws://{}/ws", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    // Set up graceful shutdown signal handler
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
