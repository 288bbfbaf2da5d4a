//! Agent card types.
//!
//! Every agent server publishes a card describing who it is and what it
//! can do; the coordinator and the gateway surface these to users.

use serde::{Deserialize, Serialize};

/// Declared capabilities of an agent server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AgentCapabilities {
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub memory: bool,
}

/// One skill an agent advertises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSkill {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Identity card of an agent server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            capabilities: AgentCapabilities::default(),
            skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_capabilities(mut self, capabilities: AgentCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl AgentSkill {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            examples: Vec::new(),
        }
    }

    pub fn with_examples(mut self, examples: &[&str]) -> Self {
        self.examples = examples.iter().map(|e| e.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_builder() {
        let card = AgentCard::new(
            "WeatherQueryAssistant",
            "Answers weather queries",
            "http://localhost:5005",
        )
        .with_capabilities(AgentCapabilities {
            streaming: false,
            memory: true,
        })
        .with_skill(
            AgentSkill::new("execute weather query", "Runs a weather lookup")
                .with_examples(&["Beijing 2025-07-30", "Shanghai next 5 days"]),
        );

        assert_eq!(card.name, "WeatherQueryAssistant");
        assert_eq!(card.skills.len(), 1);
        assert_eq!(card.skills[0].examples.len(), 2);
        assert!(card.capabilities.memory);
    }

    #[test]
    fn card_roundtrip() {
        let card = AgentCard::new("TicketQueryAssistant", "Ticket lookups", "http://localhost:5006");
        let json = serde_json::to_string(&card).unwrap();
        let back: AgentCard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "TicketQueryAssistant");
        assert_eq!(back.url, "http://localhost:5006");
    }
}
