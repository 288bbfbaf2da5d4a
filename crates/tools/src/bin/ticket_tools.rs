//! Ticket tool server binary.
//!
//! Serves `query_tickets` on port 8001.
//!
//! # Environment Variables
//!
//! - `WAYFARER_DB` - SQLite database path (default: ./data/wayfarer.db)
//! - `TICKET_TOOLS_PORT` - listen port (default: 8001)
//! - `WAYFARER_SEED_DEMO` - when set to 1, insert a few demo listings

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_tools::ticket::QueryTicketsTool;
use wayfarer_tools::{serve, ConcertTicket, Database, FlightTicket, ToolServer, TrainTicket};

fn seed_demo_data(db: &Database) -> anyhow::Result<()> {
    db.insert_train_ticket(&TrainTicket {
        departure_city: "Beijing".into(),
        arrival_city: "Shanghai".into(),
        departure_time: "2025-08-12 07:00:00".into(),
        arrival_time: "2025-08-12 11:30:00".into(),
        train_number: "G1001".into(),
        seat_type: "second class".into(),
        total_seats: 1000,
        remaining_seats: 50,
        price: 553.5,
    })?;
    db.insert_flight_ticket(&FlightTicket {
        departure_city: "Shanghai".into(),
        arrival_city: "Guangzhou".into(),
        departure_time: "2025-09-11 08:00:00".into(),
        arrival_time: "2025-09-11 10:30:00".into(),
        flight_number: "CA1234".into(),
        cabin_type: "economy".into(),
        total_seats: 200,
        remaining_seats: 10,
        price: 1200.0,
    })?;
    db.insert_concert_ticket(&ConcertTicket {
        artist: "Dao Lang".into(),
        city: "Beijing".into(),
        venue: "Workers' Stadium".into(),
        start_time: "2025-08-23 19:00:00".into(),
        end_time: "2025-08-23 22:00:00".into(),
        ticket_type: "stand".into(),
        total_seats: 5000,
        remaining_seats: 100,
        price: 880.0,
    })?;
    tracing::info!("Seeded demo ticket listings");
    Ok(())
}

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
    let port: u16 = std::env::var("TICKET_TOOLS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8001);

    let db = Arc::new(Database::open(&db_path)?);

    if std::env::var("WAYFARER_SEED_DEMO").as_deref() == Ok("1") {
        seed_demo_data(&db)?;
    }

    let server = ToolServer::new(
        "TicketTools",
        "Ticket lookup tools over the train_tickets, flight_tickets and concert_tickets tables. \
         Read-only.",
    )
    .register(Arc::new(QueryTicketsTool::new(db)));

    let addr: SocketAddr = format!("127.0.0.1:{port}").parse()?;
    serve(server, addr).await
}
