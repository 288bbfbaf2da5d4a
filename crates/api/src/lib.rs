//! HTTP gateway for the Wayfarer travel assistant.
//!
//! This crate fronts the coordinator for browser and API clients.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/v1/chat` - Run one user turn through the coordinator
//! - `GET /api/v1/history` - Conversation turns so far
//! - `GET /api/v1/agents` - Agent cards with reachability flags
//!
//! # Architecture
//!
//! ```text
//! Browser / API client
//!    │
//!    ▼
//! ┌─────────────────┐
//! │   API Gateway   │ ◄── This crate
//! │     (Axum)      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Coordinator   │ ──▶ agent servers ──▶ tool servers
//! └─────────────────┘
//! ```

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::AppState;

/// Create the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/chat", post(routes::chat))
        .route("/api/v1/history", get(routes::history))
        .route("/api/v1/agents", get(routes::agents))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the API server on the given address.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(state);

    info!(%addr, "Starting Wayfarer API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
