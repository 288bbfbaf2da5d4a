//! The JSON envelope returned by SQL tool servers.
//!
//! Wire shape, tagged on `status`:
//! `{"status": "success", "data": [...]}` when rows matched,
//! `{"status": "no_data", "message": "..."}` when none did, and
//! `{"status": "error", "message": "..."}` when execution failed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool-server query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    Success { data: Vec<Value> },
    NoData { message: String },
    Error { message: String },
}

impl QueryOutcome {
    pub fn success(data: Vec<Value>) -> Self {
        Self::Success { data }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
