//! Task types for the agent protocol.
//!
//! A task wraps one user message on its way to an agent server and comes
//! back with a status and, on success, text artifacts.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Accepted but not yet processed.
    Submitted,
    /// Finished with artifacts attached.
    Completed,
    /// The agent needs more information from the user.
    InputRequired,
    /// Processing failed; the status message explains why.
    Failed,
}

/// Status of a task: the state plus an optional agent message
/// (the follow-up question or the failure explanation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl TaskStatus {
    pub fn submitted() -> Self {
        Self {
            state: TaskState::Submitted,
            message: None,
        }
    }
}

/// A piece of an artifact. Only text parts exist today.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
}

/// Output attached to a completed task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub parts: Vec<Part>,
}

impl Artifact {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

/// A task sent to an agent server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: String,

    /// The message that created this task
    pub message: Message,

    /// Current status
    pub status: TaskStatus,

    /// Text artifacts produced on completion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

impl Task {
    /// Create a submitted task carrying a user message.
    pub fn from_user_text(text: impl Into<String>) -> Self {
        Self {
            id: format!("task-{}", uuid::Uuid::new_v4()),
            message: Message::user(text),
            status: TaskStatus::submitted(),
            artifacts: Vec::new(),
        }
    }

    /// The text the client asked about.
    pub fn input_text(&self) -> &str {
        &self.message.content.text
    }

    /// Mark completed with a single text artifact.
    pub fn complete_with_text(mut self, text: impl Into<String>) -> Self {
        self.artifacts = vec![Artifact::text(text)];
        self.status = TaskStatus {
            state: TaskState::Completed,
            message: None,
        };
        self
    }

    /// Mark as needing more input, with the follow-up question attached.
    pub fn require_input(mut self, message: impl Into<String>) -> Self {
        self.status = TaskStatus {
            state: TaskState::InputRequired,
            message: Some(Message::agent(message)),
        };
        self
    }

    /// Mark failed with a human-readable explanation.
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.status = TaskStatus {
            state: TaskState::Failed,
            message: Some(Message::agent(message)),
        };
        self
    }

    /// Text of the first artifact, if any.
    pub fn artifact_text(&self) -> Option<&str> {
        self.artifacts.first().and_then(|a| {
            a.parts.first().map(|p| match p {
                Part::Text { text } => text.as_str(),
            })
        })
    }

    /// Text of the status message, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status
            .message
            .as_ref()
            .map(|m| m.content.text.as_str())
    }

    /// The reply a caller should surface: artifact text when completed,
    /// status message otherwise.
    pub fn reply_text(&self) -> &str {
        match self.status.state {
            TaskState::Completed => self.artifact_text().unwrap_or_default(),
            _ => self.status_text().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_submitted() {
        let task = Task::from_user_text("weather in Beijing tomorrow");

        assert!(task.id.starts_with("task-"));
        assert_eq!(task.input_text(), "weather in Beijing tomorrow");
        assert_eq!(task.status.state, TaskState::Submitted);
        assert!(task.artifacts.is_empty());
        assert!(task.status_text().is_none());
    }

    #[test]
    fn task_ids_are_unique() {
        let a = Task::from_user_text("a");
        let b = Task::from_user_text("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn complete_attaches_artifact() {
        let task = Task::from_user_text("q").complete_with_text("sunny all day");

        assert_eq!(task.status.state, TaskState::Completed);
        assert_eq!(task.artifact_text(), Some("sunny all day"));
        assert_eq!(task.reply_text(), "sunny all day");
    }

    #[test]
    fn require_input_attaches_question() {
        let task = Task::from_user_text("tickets").require_input("Which date?");

        assert_eq!(task.status.state, TaskState::InputRequired);
        assert_eq!(task.status_text(), Some("Which date?"));
        assert_eq!(task.reply_text(), "Which date?");
        assert!(task.artifact_text().is_none());
    }

    #[test]
    fn fail_attaches_explanation() {
        let task = Task::from_user_text("q").fail("query failed: boom");

        assert_eq!(task.status.state, TaskState::Failed);
        assert_eq!(task.reply_text(), "query failed: boom");
    }

    #[test]
    fn state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskState::InputRequired).unwrap(),
            "\"input_required\""
        );
        assert_eq!(
            serde_json::to_string(&TaskState::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&TaskState::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn wire_roundtrip() {
        let task = Task::from_user_text("trains to Shanghai").require_input("Which date?");
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, task.id);
        assert_eq!(back.status.state, TaskState::InputRequired);
        assert_eq!(back.status_text(), Some("Which date?"));
    }

    #[test]
    fn artifact_part_wire_shape() {
        let artifact = Artifact::text("hello");
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["parts"][0]["type"], "text");
        assert_eq!(json["parts"][0]["text"], "hello");
    }
}
