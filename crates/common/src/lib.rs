//! Common types and traits shared across Wayfarer crates.
//!
//! This crate provides the foundational abstractions that the coordinator,
//! the agent servers and the tool servers use to communicate.

pub mod card;
pub mod envelope;
pub mod error;
pub mod message;
pub mod task;
pub mod traits;

pub use card::{AgentCapabilities, AgentCard, AgentSkill};
pub use envelope::QueryOutcome;
pub use error::{Result, WayfarerError};
pub use message::{Message, MessageRole, TextContent};
pub use task::{Artifact, Part, Task, TaskState, TaskStatus};
pub use traits::TaskHandler;
