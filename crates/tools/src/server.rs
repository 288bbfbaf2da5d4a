//! HTTP surface of a tool server.
//!
//! Endpoints:
//! - `GET /health` - liveness
//! - `GET /tools` - server name, instructions and tool descriptors
//! - `POST /tools/call` - `{"tool": name, "arguments": {...}}`
//!
//! A failing tool handler never surfaces as a transport error: the
//! response carries an error envelope instead.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use wayfarer_common::QueryOutcome;

use crate::registry::{Tool, ToolDescriptor, ToolRegistry};

/// A named tool server: a registry plus its public identity.
pub struct ToolServer {
    name: String,
    instructions: String,
    registry: ToolRegistry,
}

impl ToolServer {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            registry: ToolRegistry::new(),
        }
    }

    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        self.registry.register(tool);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    server: String,
    tools: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolListing {
    pub name: String,
    pub instructions: String,
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolCallResponse {
    pub content: Value,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(self)).into_response()
    }
}

async fn health(State(server): State<Arc<ToolServer>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        server: server.name.clone(),
        tools: server.registry.len(),
    })
}

async fn list_tools(State(server): State<Arc<ToolServer>>) -> Json<ToolListing> {
    Json(ToolListing {
        name: server.name.clone(),
        instructions: server.instructions.clone(),
        tools: server.registry.descriptors(),
    })
}

async fn call_tool(
    State(server): State<Arc<ToolServer>>,
    Json(request): Json<ToolCallRequest>,
) -> Result<Json<ToolCallResponse>, ErrorResponse> {
    let tool = server.registry.get(&request.tool).ok_or_else(|| {
        warn!(tool = %request.tool, server = %server.name, "Unknown tool called");
        ErrorResponse {
            error: format!("unknown tool: {}", request.tool),
        }
    })?;

    info!(tool = %request.tool, server = %server.name, "Handling tool call");

    let content = match tool.call(request.arguments).await {
        Ok(content) => content,
        Err(e) => {
            warn!(tool = %request.tool, error = %e, "Tool call failed");
            serde_json::to_value(QueryOutcome::error(e.to_string()))
                .unwrap_or(Value::Null)
        }
    };

    Ok(Json(ToolCallResponse { content }))
}

/// Create the tool-server router.
pub fn create_router(server: Arc<ToolServer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/call", post(call_tool))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(server)
}

/// Serve a tool server on the given address.
pub async fn serve(server: ToolServer, addr: SocketAddr) -> anyhow::Result<()> {
    info!(%addr, server = %server.name, "Starting tool server");

    let router = create_router(Arc::new(server));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
