//! Integration tests for the agent servers.
//!
//! Real tool and agent servers run on random ports; scripted LLM doubles
//! stand in for the model, so the tests cover the full HTTP path:
//! client → agent server → tool server → SQLite and back.

use std::net::SocketAddr;
use std::sync::Arc;

use wayfarer_agents::{create_agent_router, AgentClient, OrderAgent, TicketAgent, WeatherAgent};
use wayfarer_common::{TaskHandler, TaskState};
use wayfarer_llm::testing::ScriptedClient;
use wayfarer_tools::booking::{OrderConcertTool, OrderFlightTool, OrderTrainTool};
use wayfarer_tools::ticket::QueryTicketsTool;
use wayfarer_tools::weather::QueryWeatherTool;
use wayfarer_tools::{
    create_router as create_tools_router, Database, ToolClient, ToolServer, TrainTicket, WeatherDay,
};

async fn start_agent(handler: Arc<dyn TaskHandler>) -> String {
    let router = create_agent_router(handler);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn start_tools(server: ToolServer) -> String {
    let router = create_tools_router(Arc::new(server));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn seeded_db() -> Arc<Database> {
    let db = Database::open_in_memory().unwrap();
    db.upsert_weather_day(&WeatherDay {
        city: "Beijing".into(),
        fx_date: "2025-08-07".into(),
        temp_max: Some(31),
        temp_min: Some(22),
        text_day: Some("Cloudy".into()),
        text_night: Some("Clear".into()),
        humidity: Some(62),
        wind_dir_day: Some("NE".into()),
        precip: Some(0.0),
        ..WeatherDay::default()
    })
    .unwrap();
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
    Arc::new(db)
}

#[tokio::test]
async fn weather_agent_completes_with_forecast_text() {
    let db = seeded_db();
    let tools_base = start_tools(
        ToolServer::new("WeatherTools", "weather lookups")
            .register(Arc::new(QueryWeatherTool::new(db))),
    )
    .await;

    let llm = Arc::new(ScriptedClient::new(&[
        "SELECT city, fx_date, temp_max, temp_min, text_day, text_night, humidity, wind_dir_day, precip \
         FROM weather_data WHERE city = 'Beijing' AND fx_date = '2025-08-07'",
    ]));
    let agent = WeatherAgent::new(llm, ToolClient::new(&tools_base));
    let agent_base = start_agent(Arc::new(agent)).await;

    let done = AgentClient::new(&agent_base)
        .send_text("user: Beijing 2025-08-07")
        .await
        .unwrap();

    assert_eq!(done.status.state, TaskState::Completed);
    let text = done.artifact_text().unwrap();
    assert!(text.contains("Beijing 2025-08-07"));
    assert!(text.contains("22-31°C"));
}

#[tokio::test]
async fn weather_agent_asks_for_missing_date() {
    let llm = Arc::new(ScriptedClient::new(&[
        r#"{"status": "input_required", "message": "Please provide the date you want."}"#,
    ]));
    // No tool call happens on this path; a dead endpoint is fine.
    let agent = WeatherAgent::new(llm, ToolClient::new("http://127.0.0.1:1"));
    let agent_base = start_agent(Arc::new(agent)).await;

    let done = AgentClient::new(&agent_base)
        .send_text("user: weather in Beijing")
        .await
        .unwrap();

    assert_eq!(done.status.state, TaskState::InputRequired);
    assert_eq!(done.status_text(), Some("Please provide the date you want."));
}

#[tokio::test]
async fn ticket_agent_completes_with_listing_text() {
    let db = seeded_db();
    let tools_base = start_tools(
        ToolServer::new("TicketTools", "ticket lookups")
            .register(Arc::new(QueryTicketsTool::new(db))),
    )
    .await;

    let llm = Arc::new(ScriptedClient::new(&[
        "{\"type\": \"train\"}\nSELECT id, departure_city, arrival_city, departure_time, arrival_time, train_number, seat_type, price, remaining_seats FROM train_tickets WHERE departure_city = 'Beijing' AND arrival_city = 'Shanghai'",
    ]));
    let agent = TicketAgent::new(llm, ToolClient::new(&tools_base));
    let agent_base = start_agent(Arc::new(agent)).await;

    let done = AgentClient::new(&agent_base)
        .send_text("user: train tickets Beijing to Shanghai 2025-08-12")
        .await
        .unwrap();

    assert_eq!(done.status.state, TaskState::Completed);
    let text = done.artifact_text().unwrap();
    assert!(text.contains("train G1001"));
    assert!(text.contains("50 left"));
}

#[tokio::test]
async fn ticket_agent_turns_no_data_into_follow_up() {
    let db = seeded_db();
    let tools_base = start_tools(
        ToolServer::new("TicketTools", "ticket lookups")
            .register(Arc::new(QueryTicketsTool::new(db))),
    )
    .await;

    let llm = Arc::new(ScriptedClient::new(&[
        "{\"type\": \"train\"}\nSELECT id, train_number FROM train_tickets WHERE departure_city = 'Chengdu'",
    ]));
    let agent = TicketAgent::new(llm, ToolClient::new(&tools_base));
    let agent_base = start_agent(Arc::new(agent)).await;

    let done = AgentClient::new(&agent_base)
        .send_text("user: train tickets from Chengdu")
        .await
        .unwrap();

    assert_eq!(done.status.state, TaskState::InputRequired);
    assert!(done.status_text().unwrap().contains("No ticket data"));
}

#[tokio::test]
async fn order_agent_books_after_availability_check() {
    let db = seeded_db();
    let ticket_tools_base = start_tools(
        ToolServer::new("TicketTools", "ticket lookups")
            .register(Arc::new(QueryTicketsTool::new(db))),
    )
    .await;
    let order_tools_base = start_tools(
        ToolServer::new("OrderTools", "booking stubs")
            .register(Arc::new(OrderTrainTool))
            .register(Arc::new(OrderFlightTool))
            .register(Arc::new(OrderConcertTool)),
    )
    .await;

    let ticket_llm = Arc::new(ScriptedClient::new(&[
        "{\"type\": \"train\"}\nSELECT id, departure_city, arrival_city, departure_time, arrival_time, train_number, seat_type, price, remaining_seats FROM train_tickets WHERE train_number = 'G1001'",
    ]));
    let ticket_agent = TicketAgent::new(ticket_llm, ToolClient::new(&ticket_tools_base));
    let ticket_base = start_agent(Arc::new(ticket_agent)).await;

    let order_llm = Arc::new(ScriptedClient::new(&[
        r#"{"tool": "order_train", "arguments": {"departure_date": "2025-08-12", "train_number": "G1001", "seat_type": "second class", "count": 1}}"#,
        "Done: one second-class ticket on G1001 is booked.",
    ]));
    let order_agent = OrderAgent::new(
        order_llm,
        AgentClient::new(&ticket_base),
        ToolClient::new(&order_tools_base),
    );
    let order_base = start_agent(Arc::new(order_agent)).await;

    let done = AgentClient::new(&order_base)
        .send_text("user: book one second class ticket on G1001 for 2025-08-12")
        .await
        .unwrap();

    assert_eq!(done.status.state, TaskState::Completed);
    let text = done.artifact_text().unwrap();
    assert!(text.contains("Availability:"));
    assert!(text.contains("train G1001"));
    assert!(text.contains("Booking result: Done: one second-class ticket on G1001 is booked."));
}

#[tokio::test]
async fn order_agent_propagates_ticket_follow_up() {
    let ticket_llm = Arc::new(ScriptedClient::new(&[
        r#"{"status": "input_required", "message": "Please provide the ticket kind and a date."}"#,
    ]));
    let ticket_agent = TicketAgent::new(ticket_llm, ToolClient::new("http://127.0.0.1:1"));
    let ticket_base = start_agent(Arc::new(ticket_agent)).await;

    let order_llm = Arc::new(ScriptedClient::new(&[]));
    let order_agent = OrderAgent::new(
        order_llm,
        AgentClient::new(&ticket_base),
        ToolClient::new("http://127.0.0.1:1"),
    );
    let order_base = start_agent(Arc::new(order_agent)).await;

    let done = AgentClient::new(&order_base)
        .send_text("user: book tickets")
        .await
        .unwrap();

    assert_eq!(done.status.state, TaskState::InputRequired);
    assert_eq!(
        done.status_text(),
        Some("Please provide the ticket kind and a date.")
    );
}

#[tokio::test]
async fn agent_card_is_served() {
    let llm = Arc::new(ScriptedClient::new(&[]));
    let agent = WeatherAgent::new(llm, ToolClient::new("http://127.0.0.1:1"));
    let agent_base = start_agent(Arc::new(agent)).await;

    let card = AgentClient::new(&agent_base).get_card().await.unwrap();
    assert_eq!(card.name, "WeatherQueryAssistant");
    assert_eq!(card.skills.len(), 1);
    assert!(card.capabilities.memory);
}
