//! Conversation coordinator for Wayfarer.
//!
//! The coordinator is the front of the system:
//! 1. Receives user text and appends it to the session
//! 2. Classifies intents with the LLM (and rewrites queries for agents)
//! 3. Dispatches one task per routed intent to the agent servers
//! 4. Summarizes agent results and aggregates the reply
//!
//! # Architecture
//!
//! ```text
//! User text
//!      │
//!      ▼
//! ┌─────────────────┐
//! │   Coordinator   │  ◄── LLM intent classification
//! │   (this crate)  │
//! └────────┬────────┘
//!          │ agent-protocol tasks
//!    ┌─────┴──────┬────────────┐
//!    ▼            ▼            ▼
//! [Weather]   [Ticket]     [Order]
//!  agent       agent        agent
//! ```

pub mod config;
pub mod intent;
pub mod prompts;
pub mod routing;
pub mod session;

pub use config::{AgentEndpoints, CoordinatorConfig};
pub use intent::{IntentClassifier, IntentOutput};
pub use routing::{AgentKind, Intent};
pub use session::{ChatRole, ChatTurn, Session};

use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info};
use wayfarer_agents::AgentClient;
use wayfarer_common::{AgentCard, Result, WayfarerError};
use wayfarer_llm::{build_llm_client, LlmClient, LlmRequest};

/// Reply line for a classifier label with no known route.
const UNSUPPORTED_INTENT_REPLY: &str = "This request is not supported yet.";

/// An agent as seen from the coordinator, card included when reachable.
#[derive(Debug, Clone, Serialize)]
pub struct AgentCardInfo {
    pub name: String,
    pub url: String,
    pub online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<AgentCard>,
}

/// The conversation coordinator. One instance holds one conversation.
pub struct Coordinator {
    llm: Arc<dyn LlmClient>,
    classifier: IntentClassifier,
    weather_client: AgentClient,
    ticket_client: AgentClient,
    order_client: AgentClient,
    session: RwLock<Session>,
}

impl Coordinator {
    /// Create a coordinator from configuration, building the LLM stack.
    pub fn new(config: CoordinatorConfig) -> Result<Self> {
        let llm = build_llm_client(&config.llm)?;
        Ok(Self::with_llm(&config, llm))
    }

    /// Create a coordinator with an externally built LLM client.
    pub fn with_llm(config: &CoordinatorConfig, llm: Arc<dyn LlmClient>) -> Self {
        info!(model = %llm.model_name(), "Initializing coordinator");
        Self {
            classifier: IntentClassifier::new(llm.clone()),
            weather_client: AgentClient::new(&config.agents.weather),
            ticket_client: AgentClient::new(&config.agents.ticket),
            order_client: AgentClient::new(&config.agents.order),
            llm,
            session: RwLock::new(Session::new()),
        }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    fn client_for(&self, kind: AgentKind) -> &AgentClient {
        match kind {
            AgentKind::Weather => &self.weather_client,
            AgentKind::Ticket => &self.ticket_client,
            AgentKind::Order => &self.order_client,
        }
    }

    /// The conversation so far.
    pub async fn turns(&self) -> Vec<ChatTurn> {
        self.session.read().await.turns().to_vec()
    }

    /// Fetch every agent's card, marking unreachable agents offline.
    pub async fn agent_cards(&self) -> Vec<AgentCardInfo> {
        let mut cards = Vec::new();
        for kind in [AgentKind::Weather, AgentKind::Ticket, AgentKind::Order] {
            let client = self.client_for(kind);
            let (online, card) = match client.get_card().await {
                Ok(card) => (true, Some(card)),
                Err(e) => {
                    error!(agent = kind.name(), error = %e, "Agent card fetch failed");
                    (false, None)
                }
            };
            cards.push(AgentCardInfo {
                name: kind.name().to_string(),
                url: client.base_url().to_string(),
                online,
                card,
            });
        }
        cards
    }

    /// Process one user turn end-to-end and return the assistant reply.
    ///
    /// Never fails: classifier and dispatch errors come back as readable
    /// apology messages and still land in the history.
    pub async fn process(&self, user_input: &str) -> String {
        self.session.write().await.push_user(user_input);

        let reply = match self.respond(user_input).await {
            Ok(reply) => reply,
            Err(WayfarerError::Intent(e)) => {
                error!(error = %e, "Intent classification failed");
                format!("Intent recognition failed: {e}. Please try again.")
            }
            Err(e) => {
                error!(error = %e, "Turn processing failed");
                format!("Processing failed: {e}. Please try again.")
            }
        };

        self.session.write().await.push_assistant(&reply);
        reply
    }

    async fn respond(&self, user_input: &str) -> Result<String> {
        let window = self.session.read().await.classifier_window();
        let today = Local::now().format("%Y-%m-%d").to_string();

        let output = self.classifier.classify(&window, user_input, &today).await?;

        // Out-of-scope and clarifying questions short-circuit routing;
        // the classifier already wrote the reply.
        if output.is_out_of_scope() || !output.follow_up_message.is_empty() {
            return Ok(output.follow_up_message);
        }

        let mut responses = Vec::new();
        let mut routed = Vec::new();

        for label in &output.intents {
            info!(intent = %label, "Handling intent");
            match Intent::parse(label) {
                Some(Intent::Attraction) => {
                    let prompt = prompts::attraction_prompt(user_input);
                    let response = self.llm.complete(LlmRequest::user(prompt)).await?;
                    responses.push(response.content.trim().to_string());
                }
                Some(intent) => match intent.agent() {
                    Some(kind) => {
                        let query = output
                            .user_queries
                            .get(label)
                            .cloned()
                            .unwrap_or_else(|| user_input.to_string());
                        responses.push(self.dispatch(kind, &query).await?);
                        routed.push(kind.name());
                    }
                    None => responses.push(UNSUPPORTED_INTENT_REPLY.to_string()),
                },
                None => responses.push(UNSUPPORTED_INTENT_REPLY.to_string()),
            }
        }

        if !routed.is_empty() {
            info!(agents = ?routed, "Routed to agents");
        }

        Ok(responses.join("\n\n"))
    }

    /// Send one rewritten query to an agent and post-process its reply.
    async fn dispatch(&self, kind: AgentKind, query: &str) -> Result<String> {
        let excerpt = self.session.read().await.agent_excerpt(query);
        info!(agent = kind.name(), query = %query, "Dispatching task");

        let task = self.client_for(kind).send_text(excerpt).await?;
        info!(
            agent = kind.name(),
            state = ?task.status.state,
            "Agent task finished"
        );
        let agent_result = task.reply_text().to_string();

        match kind {
            AgentKind::Weather => {
                self.summarize(prompts::summarize_weather_prompt(query, &agent_result))
                    .await
            }
            AgentKind::Ticket => {
                self.summarize(prompts::summarize_ticket_prompt(query, &agent_result))
                    .await
            }
            AgentKind::Order => Ok(agent_result),
        }
    }

    async fn summarize(&self, prompt: String) -> Result<String> {
        let response = self.llm.complete(LlmRequest::user(prompt)).await?;
        Ok(response.content.trim().to_string())
    }
}
