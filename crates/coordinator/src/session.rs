//! Conversation session state.
//!
//! Two views of the same conversation: a turn list for display, and a
//! flat `User:`/`Assistant:` line history that the prompts window into.
//! The classifier sees the last [`CLASSIFIER_WINDOW_LINES`] lines; agent
//! dispatch sees the lines before the just-appended user line plus the
//! rewritten query.

use serde::{Deserialize, Serialize};

/// History lines shown to the intent classifier.
pub const CLASSIFIER_WINDOW_LINES: usize = 6;

/// History lines (before the current query) shown to agents.
pub const AGENT_EXCERPT_LINES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// One conversation: turns plus the flat history string.
#[derive(Debug, Default)]
pub struct Session {
    turns: Vec<ChatTurn>,
    history: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.history.push_str(&format!("\nUser: {content}"));
        self.turns.push(ChatTurn {
            role: ChatRole::User,
            content,
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.history.push_str(&format!("\nAssistant: {content}"));
        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            content,
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    /// The classifier's view: the last few history lines.
    pub fn classifier_window(&self) -> String {
        let lines: Vec<&str> = self.history.split('\n').collect();
        let start = lines.len().saturating_sub(CLASSIFIER_WINDOW_LINES);
        lines[start..].join("\n")
    }

    /// The excerpt sent to an agent: the lines before the current user
    /// line, followed by the rewritten query.
    pub fn agent_excerpt(&self, query: &str) -> String {
        let lines: Vec<&str> = self.history.split('\n').collect();
        let end = lines.len().saturating_sub(1);
        let start = end.saturating_sub(AGENT_EXCERPT_LINES);
        let mut excerpt = lines[start..end].join("\n");
        excerpt.push_str(&format!("\nUser: {query}"));
        excerpt
    }
}
