//! HTTP surface of an agent server.
//!
//! Endpoints:
//! - `GET /health` - liveness
//! - `GET /agent` - the agent card
//! - `POST /tasks` - process one task to a terminal state
//!
//! Task handling never returns a transport error for an application
//! problem: the handler folds failures into the task status.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use wayfarer_common::{AgentCard, Task, TaskHandler};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    agent: String,
}

async fn health(State(handler): State<Arc<dyn TaskHandler>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        agent: handler.card().name.clone(),
    })
}

async fn agent_card(State(handler): State<Arc<dyn TaskHandler>>) -> Json<AgentCard> {
    Json(handler.card().clone())
}

async fn handle_task(
    State(handler): State<Arc<dyn TaskHandler>>,
    Json(task): Json<Task>,
) -> Json<Task> {
    info!(
        agent = %handler.card().name,
        task_id = %task.id,
        input_preview = %task.input_text().chars().take(80).collect::<String>(),
        "Handling task"
    );
    Json(handler.handle_task(task).await)
}

/// Create the agent-protocol router for a task handler.
pub fn create_agent_router(handler: Arc<dyn TaskHandler>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/agent", get(agent_card))
        .route("/tasks", post(handle_task))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(handler)
}

/// Serve an agent on the given address.
pub async fn serve_agent(handler: Arc<dyn TaskHandler>, addr: SocketAddr) -> anyhow::Result<()> {
    info!(%addr, agent = %handler.card().name, "Starting agent server");

    let router = create_agent_router(handler);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
