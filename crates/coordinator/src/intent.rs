//! LLM-backed intent classification.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use wayfarer_agents::sqlgen::strip_code_fence;
use wayfarer_common::{Result, WayfarerError};
use wayfarer_llm::{LlmClient, LlmRequest};

use crate::prompts;

/// The classifier's strict-JSON output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentOutput {
    #[serde(default)]
    pub intents: Vec<String>,
    #[serde(default)]
    pub user_queries: HashMap<String, String>,
    #[serde(default)]
    pub follow_up_message: String,
}

impl IntentOutput {
    pub fn is_out_of_scope(&self) -> bool {
        self.intents.iter().any(|i| i == "out_of_scope")
    }
}

/// Classifies one user query against the conversation window.
pub struct IntentClassifier {
    llm: Arc<dyn LlmClient>,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Run the classifier. The model sometimes wraps its JSON in a
    /// markdown fence; that is stripped before parsing. A response that
    /// still fails to parse is an [`WayfarerError::Intent`].
    pub async fn classify(
        &self,
        conversation_history: &str,
        query: &str,
        current_date: &str,
    ) -> Result<IntentOutput> {
        let prompt = prompts::intent_prompt(conversation_history, query, current_date);
        let response = self
            .llm
            .complete(LlmRequest::user(prompt))
            .await
            .map_err(|e| WayfarerError::Intent(e.to_string()))?;
        info!(raw = %response.content, "Intent classification output");

        let cleaned = strip_code_fence(&response.content);
        let output: IntentOutput = serde_json::from_str(&cleaned)
            .map_err(|e| WayfarerError::Intent(format!("invalid classifier JSON: {e}")))?;
        info!(
            intents = ?output.intents,
            follow_up = %output.follow_up_message,
            "Classified intents"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_llm::testing::ScriptedClient;

    #[tokio::test]
    async fn parses_strict_json() {
        let llm = Arc::new(ScriptedClient::new(&[
            r#"{"intents": ["weather"], "user_queries": {"weather": "weather in Beijing today"}, "follow_up_message": ""}"#,
        ]));
        let classifier = IntentClassifier::new(llm);

        let output = classifier
            .classify("", "weather today", "2025-08-07")
            .await
            .unwrap();
        assert_eq!(output.intents, vec!["weather"]);
        assert_eq!(
            output.user_queries.get("weather").map(String::as_str),
            Some("weather in Beijing today")
        );
        assert!(output.follow_up_message.is_empty());
        assert!(!output.is_out_of_scope());
    }

    #[tokio::test]
    async fn strips_markdown_fence() {
        let llm = Arc::new(ScriptedClient::new(&[
            "```json\n{\"intents\": [\"out_of_scope\"], \"user_queries\": {}, \"follow_up_message\": \"Hello!\"}\n```",
        ]));
        let classifier = IntentClassifier::new(llm);

        let output = classifier.classify("", "hi", "2025-08-07").await.unwrap();
        assert!(output.is_out_of_scope());
        assert_eq!(output.follow_up_message, "Hello!");
    }

    #[tokio::test]
    async fn malformed_json_is_an_intent_error() {
        let llm = Arc::new(ScriptedClient::new(&["The user wants weather."]));
        let classifier = IntentClassifier::new(llm);

        let err = classifier
            .classify("", "weather", "2025-08-07")
            .await
            .unwrap_err();
        assert!(matches!(err, WayfarerError::Intent(_)));
    }

    #[tokio::test]
    async fn missing_fields_default() {
        let llm = Arc::new(ScriptedClient::new(&[r#"{"intents": ["weather"]}"#]));
        let classifier = IntentClassifier::new(llm);

        let output = classifier
            .classify("", "weather", "2025-08-07")
            .await
            .unwrap();
        assert!(output.user_queries.is_empty());
        assert!(output.follow_up_message.is_empty());
    }
}
