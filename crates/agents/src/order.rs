//! Ticket order agent.
//!
//! Chains two hops: first the ticket query agent confirms availability,
//! then a bounded tool-calling loop against the order tool server places
//! the booking.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};
use wayfarer_common::{
    AgentCapabilities, AgentCard, AgentSkill, Result, Task, TaskHandler, TaskState, WayfarerError,
};
use wayfarer_llm::{ChatMessage, LlmClient, LlmRequest};
use wayfarer_tools::ToolClient;

use crate::client::AgentClient;
use crate::prompts;
use crate::sqlgen::{parse_order_output, OrderDirective};

use std::sync::Arc;

const DEFAULT_URL: &str = "http://localhost:5007";

/// Upper bound on LLM turns in the booking loop. One tool call plus a
/// confirmation fits in two; the rest is slack for a retried extraction.
const MAX_BOOKING_STEPS: usize = 4;

enum BookingOutcome {
    Booked(String),
    NeedsInput(String),
}

pub struct OrderAgent {
    card: AgentCard,
    llm: Arc<dyn LlmClient>,
    ticket_agent: AgentClient,
    tools: ToolClient,
}

impl OrderAgent {
    pub fn new(llm: Arc<dyn LlmClient>, ticket_agent: AgentClient, tools: ToolClient) -> Self {
        let card = AgentCard::new(
            "TicketOrderAssistant",
            "Books train, flight and concert tickets after confirming availability",
            DEFAULT_URL,
        )
        .with_capabilities(AgentCapabilities {
            streaming: false,
            memory: true,
        })
        .with_skill(
            AgentSkill::new(
                "execute ticket order",
                "Places a ticket order from natural-language input and returns the result",
            )
            .with_examples(&[
                "Beijing to Shanghai 2025-11-15 train second class 1 ticket",
                "Shanghai to Beijing 2025-12-11 flight business class 2 tickets",
            ]),
        );

        Self {
            card,
            llm,
            ticket_agent,
            tools,
        }
    }

    /// Run the booking loop: the model either calls a tool, asks for
    /// missing details, or produces the final confirmation text.
    async fn run_booking(&self, conversation: &str, availability: &str) -> Result<BookingOutcome> {
        let listing = self.tools.list_tools().await?;
        let system_prompt = prompts::order_system_prompt(&listing.tools);

        let mut messages = vec![ChatMessage::user(format!(
            "{conversation}\nAvailability:\n{availability}"
        ))];

        for step in 0..MAX_BOOKING_STEPS {
            let request = LlmRequest {
                system_prompt: Some(system_prompt.clone()),
                messages: messages.clone(),
                ..LlmRequest::default()
            };
            let response = self.llm.complete(request).await?;
            info!(step, raw = %response.content, "Booking loop output");

            match parse_order_output(&response.content) {
                OrderDirective::ToolCall { tool, arguments } => {
                    info!(tool = %tool, "Booking loop calling tool");
                    let result = self.tools.call_tool(&tool, arguments).await?;
                    let result_text = match result {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    messages.push(ChatMessage::assistant(response.content));
                    messages.push(ChatMessage::user(format!("Tool result: {result_text}")));
                }
                OrderDirective::InputRequired(message) => {
                    return Ok(BookingOutcome::NeedsInput(message));
                }
                OrderDirective::Final(text) => {
                    return Ok(BookingOutcome::Booked(text));
                }
            }
        }

        Err(WayfarerError::Agent(format!(
            "booking did not converge within {MAX_BOOKING_STEPS} steps"
        )))
    }
}

#[async_trait]
impl TaskHandler for OrderAgent {
    fn card(&self) -> &AgentCard {
        &self.card
    }

    async fn handle_task(&self, task: Task) -> Task {
        let conversation = task.input_text().to_string();
        info!(task_id = %task.id, "Order agent handling task");

        // Availability first; the ticket agent also catches underspecified
        // requests and its follow-up question propagates unchanged.
        let availability_task = match self.ticket_agent.send_text(&conversation).await {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "Availability check failed");
                return task.fail(format!(
                    "Availability check failed: {e}. Please retry or add more detail."
                ));
            }
        };

        if availability_task.status.state != TaskState::Completed {
            let message = availability_task
                .status_text()
                .unwrap_or("Please provide the ticket details needed for the booking.")
                .to_string();
            info!(message = %message, "No availability yet, asking the user");
            return task.require_input(message);
        }

        let availability = availability_task.artifact_text().unwrap_or_default().to_string();
        info!(availability = %availability, "Availability confirmed");

        match self.run_booking(&conversation, &availability).await {
            Ok(BookingOutcome::Booked(result)) => task.complete_with_text(format!(
                "Availability:\n{availability}\nBooking result: {result}"
            )),
            Ok(BookingOutcome::NeedsInput(message)) => task.require_input(message),
            Err(e) => {
                error!(error = %e, "Booking failed");
                task.fail(format!("Booking failed: {e}. Please retry or add more detail."))
            }
        }
    }
}
