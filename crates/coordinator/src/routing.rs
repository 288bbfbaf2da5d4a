//! Intent labels and their agent routes.

use serde::{Deserialize, Serialize};

/// Which agent server handles a routed intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Weather,
    Ticket,
    Order,
}

impl AgentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weather => "WeatherQueryAssistant",
            Self::Ticket => "TicketQueryAssistant",
            Self::Order => "TicketOrderAssistant",
        }
    }
}

/// A user intent, as labeled by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Weather,
    Flight,
    Train,
    Concert,
    Order,
    Attraction,
    OutOfScope,
}

impl Intent {
    /// Parse a classifier label. Unknown labels return `None` and are
    /// answered with an "unsupported" reply line.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "weather" => Some(Self::Weather),
            "flight" => Some(Self::Flight),
            "train" => Some(Self::Train),
            "concert" => Some(Self::Concert),
            "order" => Some(Self::Order),
            "attraction" => Some(Self::Attraction),
            "out_of_scope" => Some(Self::OutOfScope),
            _ => None,
        }
    }

    /// The agent that serves this intent, if any. Attraction requests are
    /// answered by the coordinator's own LLM; out-of-scope has no route.
    pub fn agent(&self) -> Option<AgentKind> {
        match self {
            Self::Weather => Some(AgentKind::Weather),
            Self::Flight | Self::Train | Self::Concert => Some(AgentKind::Ticket),
            Self::Order => Some(AgentKind::Order),
            Self::Attraction | Self::OutOfScope => None,
        }
    }
}
