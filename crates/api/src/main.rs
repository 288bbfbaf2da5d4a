//! Wayfarer API server binary.
//!
//! Usage:
//!   wayfarer-api --config config.toml
//!   wayfarer-api --port 8080
//!   wayfarer-api --port 8080 --bind 0.0.0.0
//!
//! # Environment Variables
//!
//! - `WAYFARER_BIND_ADDR` - Server bind address (default: 127.0.0.1)
//! - `DASHSCOPE_API_KEY` or `OPENAI_API_KEY` - model API key

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_api::{serve, AppState};
use wayfarer_coordinator::CoordinatorConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wayfarer_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut port: u16 = 8080;
    let mut config_path: Option<String> = None;
    let mut bind_addr: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().expect("Invalid port number");
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_addr = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Wayfarer API Server");
                println!();
                println!("Usage: wayfarer-api [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --port <PORT>    Port to listen on (default: 8080)");
                println!(
                    "  -b, --bind <ADDR>    Bind address (default: 127.0.0.1, env: WAYFARER_BIND_ADDR)"
                );
                println!("  -c, --config <FILE>  Path to config.toml file");
                println!("  -h, --help           Show this help message");
                println!();
                println!("Environment variables:");
                println!("  WAYFARER_BIND_ADDR           Server bind address (overridden by --bind)");
                println!("  DASHSCOPE_API_KEY            Model API key (or OPENAI_API_KEY)");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let host = bind_addr
        .or_else(|| std::env::var("WAYFARER_BIND_ADDR").ok())
        .unwrap_or_else(|| "127.0.0.1".to_string());

    if host == "0.0.0.0" {
        tracing::warn!(
            "Server binding to 0.0.0.0 - this exposes the API to all network interfaces."
        );
    }

    let config = if let Some(path) = config_path {
        tracing::info!(path = %path, "Loading configuration");
        CoordinatorConfig::from_file(&path)?
    } else {
        tracing::info!("Using default configuration");
        CoordinatorConfig::default()
    };

    let state = AppState::new(config)?;

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    serve(Arc::new(state), addr).await
}
