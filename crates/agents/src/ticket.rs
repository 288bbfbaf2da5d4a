//! Ticket query agent.
//!
//! Classifies the ticket kind, generates the matching SELECT, executes it
//! through the ticket tool server and renders rows per kind.

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
use crate::sqlgen::{parse_ticket_output, TicketKind, TicketSqlGeneration};

use std::sync::Arc;

const DEFAULT_URL: &str = "http://localhost:5006";

const EMPTY_RESULT_MESSAGE: &str = "No results. If another date would work, please add it.";

pub struct TicketAgent {
    card: AgentCard,
    llm: Arc<dyn LlmClient>,
    tools: ToolClient,
}

impl TicketAgent {
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolClient) -> Self {
        let card = AgentCard::new(
            "TicketQueryAssistant",
            "Answers train, flight and concert ticket queries by generating SQL over the ticket tables",
            DEFAULT_URL,
        )
        .with_capabilities(AgentCapabilities {
            streaming: false,
            memory: true,
        })
        .with_skill(
            AgentSkill::new(
                "execute ticket query",
                "Runs a ticket lookup from natural-language input and returns database results",
            )
            .with_examples(&[
                "train tickets Beijing to Shanghai 2025-07-31 hard sleeper",
                "flights Beijing to Shanghai 2025-07-31 economy",
                "Dao Lang concert in Beijing 2025-08-23 stand",
            ]),
        );

        Self { card, llm, tools }
    }

    /// Ask the model for a typed SELECT. LLM failures degrade to a
    /// follow-up question rather than an error.
    pub async fn generate_sql(
        &self,
        conversation: &str,
        current_date: &str,
    ) -> TicketSqlGeneration {
        let prompt = prompts::ticket_sql_prompt(conversation, current_date);
        match self.llm.complete(LlmRequest::user(prompt)).await {
            Ok(response) => {
                info!(raw = %response.content, "Ticket SQL generation output");
                parse_ticket_output(&response.content)
            }
            Err(e) => {
                error!(error = %e, "Ticket SQL generation failed");
                TicketSqlGeneration::InputRequired(
                    "The query could not be processed. Please provide ticket details.".into(),
                )
            }
        }
    }

    /// Render result rows, one line per listing, in the kind's format.
    pub fn format_rows(kind: TicketKind, rows: &[Value]) -> String {
        fn cell(row: &Value, key: &str) -> String {
            match row.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "-".to_string(),
                Some(other) => other.to_string(),
            }
        }

        rows.iter()
            .map(|d| match kind {
                TicketKind::Train => format!(
                    "{} to {} {}: train {}, {}, {} yuan, {} left",
                    cell(d, "departure_city"),
                    cell(d, "arrival_city"),
                    cell(d, "departure_time"),
                    cell(d, "train_number"),
                    cell(d, "seat_type"),
                    cell(d, "price"),
                    cell(d, "remaining_seats"),
                ),
                TicketKind::Flight => format!(
                    "{} to {} {}: flight {}, {}, {} yuan, {} left",
                    cell(d, "departure_city"),
                    cell(d, "arrival_city"),
                    cell(d, "departure_time"),
                    cell(d, "flight_number"),
                    cell(d, "cabin_type"),
                    cell(d, "price"),
                    cell(d, "remaining_seats"),
                ),
                TicketKind::Concert => format!(
                    "{} {}: {} concert, {}, venue {}, {} yuan, {} left",
                    cell(d, "city"),
                    cell(d, "start_time"),
                    cell(d, "artist"),
                    cell(d, "ticket_type"),
                    cell(d, "venue"),
                    cell(d, "price"),
                    cell(d, "remaining_seats"),
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl TaskHandler for TicketAgent {
    fn card(&self) -> &AgentCard {
        &self.card
    }

    async fn handle_task(&self, task: Task) -> Task {
        let conversation = task.input_text().to_string();
        info!(task_id = %task.id, "Ticket agent handling task");

        let today = Local::now().format("%Y-%m-%d").to_string();
        let (kind, sql) = match self.generate_sql(&conversation, &today).await {
            TicketSqlGeneration::InputRequired(message) => return task.require_input(message),
            TicketSqlGeneration::Query { kind, sql } => (kind, sql),
        };
        info!(kind = kind.label(), sql = %sql, "Executing ticket SQL");

        let content = match self.tools.call_tool("query_tickets", json!({ "sql": sql })).await {
            Ok(content) => content,
            Err(e) => {
                error!(error = %e, "Ticket tool call failed");
                return task.fail(format!(
                    "Ticket lookup failed: {e}. Please retry or add more detail."
                ));
            }
        };

        let outcome: QueryOutcome = match serde_json::from_value(content) {
            Ok(outcome) => outcome,
            Err(e) => return task.fail(format!("Ticket lookup returned an invalid envelope: {e}")),
        };

        match outcome {
            QueryOutcome::Success { data } => {
                let mut text = Self::format_rows(kind, &data);
                if text.is_empty() {
                    text = EMPTY_RESULT_MESSAGE.to_string();
                }
                task.complete_with_text(text)
            }
            QueryOutcome::NoData { message } => task.require_input(message),
            QueryOutcome::Error { message } => task.fail(message),
        }
    }
}
