//! Ticket order agent server binary.
//!
//! # Environment Variables
//!
//! - `ORDER_AGENT_PORT` - listen port (default: 5007)
//! - `TICKET_AGENT_URL` - ticket query agent (default: http://127.0.0.1:5006)
//! - `ORDER_TOOLS_URL` - booking tool server (default: http://127.0.0.1:8003)
//! - `WAYFARER_LLM_MODEL` / `WAYFARER_LLM_URL` - model override
//! - `DASHSCOPE_API_KEY` or `OPENAI_API_KEY` - model API key

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_agents::{serve_agent, AgentClient, OrderAgent};
use wayfarer_llm::{build_llm_client, LlmConfig};
use wayfarer_tools::ToolClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("ORDER_AGENT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5007);
    let ticket_agent_url = std::env::var("TICKET_AGENT_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:5006".to_string());
    let tools_url = std::env::var("ORDER_TOOLS_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8003".to_string());

    let llm = build_llm_client(&LlmConfig::from_env())?;
    let agent = OrderAgent::new(
        llm,
        AgentClient::new(ticket_agent_url),
        ToolClient::new(tools_url),
    );

    let addr: SocketAddr = format!("127.0.0.1:{port}").parse()?;
    serve_agent(Arc::new(agent), addr).await
}
