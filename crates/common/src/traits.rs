//! The task-handler trait implemented by every agent server.
//!
//! Defined in `wayfarer-common` so that the agent crate and the
//! coordinator can reference it without circular dependencies.

use crate::{AgentCard, Task};
use async_trait::async_trait;

/// An agent's task-processing surface.
///
/// `handle_task` returns the task rather than a `Result`: every failure
/// along the way is folded into a `failed` task status with a
/// human-readable message, so the wire never sees a transport error for
/// an application problem.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// The card this agent publishes.
    fn card(&self) -> &AgentCard;

    /// Process one task to a terminal state.
    async fn handle_task(&self, task: Task) -> Task;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskState;

    struct EchoHandler {
        card: AgentCard,
    }

    #[async_trait]
    impl TaskHandler for EchoHandler {
        fn card(&self) -> &AgentCard {
            &self.card
        }

        async fn handle_task(&self, task: Task) -> Task {
            let text = format!("echo: {}", task.input_text());
            task.complete_with_text(text)
        }
    }

    #[tokio::test]
    async fn handler_is_object_safe() {
        let handler: Box<dyn TaskHandler> = Box::new(EchoHandler {
            card: AgentCard::new("Echo", "echoes", "http://localhost:0"),
        });

        let done = handler.handle_task(Task::from_user_text("hi")).await;
        assert_eq!(done.status.state, TaskState::Completed);
        assert_eq!(done.artifact_text(), Some("echo: hi"));
    }
}
