//! Weather query agent.
//!
//! Turns the conversation excerpt into a SELECT over `weather_data`,
//! executes it through the weather tool server and renders the rows as a
//! short per-day report.

use async_trait::async_trait;
use chrono::Local;
use serde_json::{json, Value};
use tracing::{error, info};
use wayfarer_common::{
    AgentCapabilities, AgentCard, AgentSkill, QueryOutcome, Task, TaskHandler,
};
use wayfarer_llm::{LlmClient, LlmRequest};
use wayfarer_tools::ToolClient;

use crate::prompts;
use crate::sqlgen::{parse_weather_output, SqlGeneration};

use std::sync::Arc;

/// Agent card URL default; overridden per deployment.
const DEFAULT_URL: &str = "http://localhost:5005";

pub struct WeatherAgent {
    card: AgentCard,
    llm: Arc<dyn LlmClient>,
    tools: ToolClient,
}

impl WeatherAgent {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolClient) -> Self {
        let card = AgentCard::new(
            "WeatherQueryAssistant",
            "Answers weather queries by generating SQL over the weather database",
            DEFAULT_URL,
        )
        .with_capabilities(AgentCapabilities {
            streaming: false,
            memory: true,
        })
        .with_skill(
            AgentSkill::new(
                "execute weather query",
                "Runs a weather lookup from natural-language input and returns database results",
            )
            .with_examples(&[
                "Beijing 2025-07-30 weather",
                "Shanghai next 5 days",
                "what's the weather today",
            ]),
        );

        Self { card, llm, tools }
    }

    /// Ask the model for SQL. LLM failures degrade to a follow-up
    /// question rather than an error.
    pub async fn generate_sql(&self, conversation: &str, current_date: &str) -> SqlGeneration {
        let prompt = prompts::weather_sql_prompt(conversation, current_date);
        match self.llm.complete(LlmRequest::user(prompt)).await {
            Ok(response) => {
                info!(raw = %response.content, "Weather SQL generation output");
                parse_weather_output(&response.content)
            }
            Err(e) => {
                error!(error = %e, "Weather SQL generation failed");
                SqlGeneration::InputRequired(
                    "The query could not be processed. Please provide a city and a date.".into(),
                )
            }
        }
    }

    /// Render result rows as one line per forecast day.
    pub fn format_rows(rows: &[Value]) -> String {
        fn cell(row: &Value, key: &str) -> String {
            match row.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "-".to_string(),
                Some(other) => other.to_string(),
            }
        }

        rows.iter()
            .map(|d| {
                format!(
                    "{} {}: {} (night: {}), {}-{}°C, humidity {}%, wind {}, precip {}mm",
                    cell(d, "city"),
                    cell(d, "fx_date"),
                    cell(d, "text_day"),
                    cell(d, "text_night"),
                    cell(d, "temp_min"),
                    cell(d, "temp_max"),
                    cell(d, "humidity"),
                    cell(d, "wind_dir_day"),
                    cell(d, "precip"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl TaskHandler for WeatherAgent {
    fn card(&self) -> &AgentCard {
        &self.card
    }

    async fn handle_task(&self, task: Task) -> Task {
        let conversation = task.input_text().to_string();
        info!(task_id = %task.id, "Weather agent handling task");

        let today = Local::now().format("%Y-%m-%d").to_string();
        let sql = match self.generate_sql(&conversation, &today).await {
            SqlGeneration::InputRequired(message) => return task.require_input(message),
            SqlGeneration::Sql(sql) => sql,
        };
        info!(sql = %sql, "Executing weather SQL");

        let content = match self.tools.call_tool("query_weather", json!({ "sql": sql })).await {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, "Weather tool call failed");
                return task.fail(format!(
                    "Weather lookup failed: {e}. Please retry or add more detail."
                ));
            }
        };

        let outcome: QueryOutcome = match serde_json::from_value(content) {
            Ok(outcome) => outcome,
            Err(e) => return task.fail(format!("Weather lookup returned an invalid envelope: {e}")),
        };

        match outcome {
            QueryOutcome::Success { data } => task.complete_with_text(Self::format_rows(&data)),
            QueryOutcome::NoData { message } => task.require_input(message),
            QueryOutcome::Error { message } => task.fail(message),
        }
    }
}
