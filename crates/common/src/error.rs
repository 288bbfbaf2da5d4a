//! Error types for Wayfarer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WayfarerError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Intent error: {0}")]
    Intent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WayfarerError>;
