//! Router setup and server startup.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use streamcast_core::StreamcastError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/", post(handlers::invoke))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured host and port and serve until the process exits.
pub async fn start_server(state: AppState) -> Result<(), StreamcastError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let router = create_router(state);

    tracing::info!("Starting skill endpoint on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StreamcastError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| StreamcastError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
