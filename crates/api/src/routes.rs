//! HTTP route handlers for the API.

use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use wayfarer_coordinator::{AgentCardInfo, ChatTurn};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub model: String,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        model: state.coordinator.model_name().to_string(),
    })
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Run one user turn through the coordinator.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ErrorResponse> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ErrorResponse {
            error: "message must not be empty".into(),
            code: "EMPTY_MESSAGE",
        });
    }

    info!(
        preview = %message.chars().take(50).collect::<String>(),
        "Received chat message"
    );

    let reply = state.coordinator.process(message).await;
    Ok(Json(ChatResponse { reply }))
}

/// The conversation so far.
pub async fn history(State(state): State<Arc<AppState>>) -> Json<Vec<ChatTurn>> {
    Json(state.coordinator.turns().await)
}

/// Live agent cards, with reachability flags.
pub async fn agents(State(state): State<Arc<AppState>>) -> Json<Vec<AgentCardInfo>> {
    Json(state.coordinator.agent_cards().await)
}
