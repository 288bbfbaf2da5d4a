//! Integration tests for the API layer.
//!
//! These spin up a real HTTP server on a random port and drive it with
//! reqwest. The coordinator runs with a scripted LLM; agent servers are
//! unreachable, which the tested endpoints either tolerate or report.

use std::net::SocketAddr;
use std::sync::Arc;

use wayfarer_api::{create_router, AppState};
use wayfarer_coordinator::{Coordinator, CoordinatorConfig};
use wayfarer_llm::testing::ScriptedClient;

async fn start_test_server(responses: &[&str]) -> String {
    let mut config = CoordinatorConfig::default();
    // Nothing is listening on these; /api/v1/agents should report offline.
    config.agents.weather = "http://127.0.0.1:1".to_string();
    config.agents.ticket = "http://127.0.0.1:1".to_string();
    config.agents.order = "http://127.0.0.1:1".to_string();

    let coordinator = Coordinator::with_llm(&config, Arc::new(ScriptedClient::new(responses)));
    let state = Arc::new(AppState::with_coordinator(coordinator));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn get(base: &str, path: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .get(format!("{base}{path}"))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let body = resp.json().await.unwrap();
    (status, body)
}

async fn post_json(base: &str, path: &str, json: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .header("content-type", "application/json")
        .body(json.to_string())
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let body = resp.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn health_reports_model_and_uptime() {
    let base = start_test_server(&[]).await;

    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "scripted");
    assert!(body["uptime_seconds"].is_number());
}

#[tokio::test]
async fn chat_round_trip_updates_history() {
    let base = start_test_server(&[
        r#"{"intents": ["out_of_scope"], "user_queries": {}, "follow_up_message": "Hello! Ask me about trips."}"#,
    ])
    .await;

    let (status, body) = post_json(&base, "/api/v1/chat", r#"{"message": "hi there"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(body["reply"], "Hello! Ask me about trips.");

    let (status, history) = get(&base, "/api/v1/history").await;
    assert_eq!(status, 200);
    let turns = history.as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0]["role"], "user");
    assert_eq!(turns[0]["content"], "hi there");
    assert_eq!(turns[1]["role"], "assistant");
}

#[tokio::test]
async fn empty_chat_message_is_rejected() {
    let base = start_test_server(&[]).await;

    let (status, body) = post_json(&base, "/api/v1/chat", r#"{"message": "   "}"#).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "EMPTY_MESSAGE");
}

#[tokio::test]
async fn agents_endpoint_reports_offline_agents() {
    let base = start_test_server(&[]).await;

    let (status, body) = get(&base, "/api/v1/agents").await;
    assert_eq!(status, 200);
    let agents = body.as_array().unwrap();
    assert_eq!(agents.len(), 3);
    assert_eq!(agents[0]["name"], "WeatherQueryAssistant");
    assert_eq!(agents[0]["online"], false);
}
