//! Integration tests for the tool server HTTP surface.
//!
//! These spin up a real server on a random port and drive it with the
//! tool client, the same way the agent servers do in production.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::json;
use wayfarer_tools::booking::OrderTrainTool;
use wayfarer_tools::ticket::QueryTicketsTool;
use wayfarer_tools::weather::QueryWeatherTool;
use wayfarer_tools::{create_router, Database, ToolClient, ToolServer, TrainTicket, WeatherDay};

async fn start_server(server: ToolServer) -> String {
    let router = create_router(Arc::new(server));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn test_db() -> Arc<Database> {
    let db = Database::open_in_memory().unwrap();
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
    })
    .unwrap();
    db.upsert_weather_day(&WeatherDay {
        city: "Beijing".into(),
        fx_date: "2025-08-07".into(),
        temp_max: Some(31),
        temp_min: Some(22),
        text_day: Some("Cloudy".into()),
        ..WeatherDay::default()
    })
    .unwrap();
    Arc::new(db)
}

#[tokio::test]
async fn list_tools_reports_descriptors() {
    let db = test_db();
    let server = ToolServer::new("TicketTools", "Ticket lookups")
        .register(Arc::new(QueryTicketsTool::new(db)));
    let base = start_server(server).await;

    let listing = ToolClient::new(&base).list_tools().await.unwrap();
    assert_eq!(listing.name, "TicketTools");
    assert_eq!(listing.tools.len(), 1);
    assert_eq!(listing.tools[0].name, "query_tickets");
}

#[tokio::test]
async fn call_query_tickets_over_http() {
    let db = test_db();
    let server = ToolServer::new("TicketTools", "Ticket lookups")
        .register(Arc::new(QueryTicketsTool::new(db)));
    let base = start_server(server).await;

    let content = ToolClient::new(&base)
        .call_tool(
            "query_tickets",
            json!({"sql": "SELECT train_number, price FROM train_tickets \
                           WHERE departure_city = 'Beijing'"}),
        )
        .await
        .unwrap();

    assert_eq!(content["status"], "success");
    assert_eq!(content["data"][0]["train_number"], "G1001");
}

#[tokio::test]
async fn call_query_weather_over_http() {
    let db = test_db();
    let server = ToolServer::new("WeatherTools", "Weather lookups")
        .register(Arc::new(QueryWeatherTool::new(db)));
    let base = start_server(server).await;

    let content = ToolClient::new(&base)
        .call_tool(
            "query_weather",
            json!({"sql": "SELECT city, temp_max FROM weather_data WHERE city = 'Beijing'"}),
        )
        .await
        .unwrap();

    assert_eq!(content["status"], "success");
    assert_eq!(content["data"][0]["temp_max"], 31);
}

#[tokio::test]
async fn unknown_tool_is_a_client_error() {
    let server = ToolServer::new("OrderTools", "Booking stubs");
    let base = start_server(server).await;

    let err = ToolClient::new(&base)
        .call_tool("order_spaceship", json!({}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn failing_handler_returns_error_envelope() {
    let db = test_db();
    let server = ToolServer::new("TicketTools", "Ticket lookups")
        .register(Arc::new(QueryTicketsTool::new(db)));
    let base = start_server(server).await;

    // Missing sql argument: the handler fails, the wire stays 200
    let content = ToolClient::new(&base)
        .call_tool("query_tickets", json!({}))
        .await
        .unwrap();
    assert_eq!(content["status"], "error");
}

#[tokio::test]
async fn booking_stub_confirms_over_http() {
    let server =
        ToolServer::new("OrderTools", "Booking stubs").register(Arc::new(OrderTrainTool));
    let base = start_server(server).await;

    let content = ToolClient::new(&base)
        .call_tool(
            "order_train",
            json!({
                "departure_date": "2025-10-30",
                "train_number": "G346",
                "seat_type": "second class",
                "count": 1
            }),
        )
        .await
        .unwrap();

    assert!(content.as_str().unwrap().contains("G346"));
}
