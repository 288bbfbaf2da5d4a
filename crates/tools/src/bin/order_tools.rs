//! Booking tool server binary.
//!
//! Serves the `order_train` / `order_flight` / `order_concert` stubs on
//! port 8003.
//!
//! # Environment Variables
//!
//! - `ORDER_TOOLS_PORT` - listen port (default: 8003)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_tools::booking::{OrderConcertTool, OrderFlightTool, OrderTrainTool};
use wayfarer_tools::{serve, ToolServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("ORDER_TOOLS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8003);

    let server = ToolServer::new(
        "OrderTools",
        "Booking tools for train, flight and concert tickets.",
    )
    .register(Arc::new(OrderTrainTool))
    .register(Arc::new(OrderFlightTool))
    .register(Arc::new(OrderConcertTool));

    let addr: SocketAddr = format!("127.0.0.1:{port}").parse()?;
    serve(server, addr).await
}
