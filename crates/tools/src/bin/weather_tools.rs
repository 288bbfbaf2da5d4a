//! Weather tool server binary.
//!
//! Serves `query_weather` on port 8002 and, when `QWEATHER_API_KEY` is
//! set, runs the daily forecast feed in the background.
//!
//! # Environment Variables
//!
//! - `WAYFARER_DB` - SQLite database path (default: ./data/wayfarer.db)
//! - `WEATHER_TOOLS_PORT` - listen port (default: 8002)
//! - `QWEATHER_API_KEY` - forecast API key; feed disabled when unset
//! - `QWEATHER_BASE_URL` - forecast API base URL override

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_tools::weather::QueryWeatherTool;
use wayfarer_tools::{serve, Database, FeedConfig, ToolServer, WeatherFeed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path =
        std::env::var("WAYFARER_DB").unwrap_or_else(|_| "./data/wayfarer.db".to_string());
    let port: u16 = std::env::var("WEATHER_TOOLS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8002);

    let db = Arc::new(Database::open(&db_path)?);

    match std::env::var("QWEATHER_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => {
            let mut config = FeedConfig::new(api_key);
            if let Ok(base_url) = std::env::var("QWEATHER_BASE_URL") {
                config.base_url = base_url;
            }
            let feed = WeatherFeed::new(config, db.clone());
            tokio::spawn(feed.run_daily());
        }
        _ => {
            tracing::warn!(
                "QWEATHER_API_KEY not set - weather feed disabled, serving stored data only"
            );
        }
    }

    let server = ToolServer::new(
        "WeatherTools",
        "Weather lookup tools over the weather_data table. Read-only.",
    )
    .register(Arc::new(QueryWeatherTool::new(db)));

    let addr: SocketAddr = format!("127.0.0.1:{port}").parse()?;
    serve(server, addr).await
}
