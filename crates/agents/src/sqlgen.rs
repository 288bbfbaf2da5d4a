//! Parsers for LLM generation output.
//!
//! The models are prompted to emit one of a small set of literal shapes;
//! anything that does not match degrades to an input-required follow-up
//! rather than an error, so a confused model turns into a clarifying
//! question instead of a failed task.

use serde_json::Value;

/// Fallback follow-up when weather SQL generation cannot be parsed.
pub const WEATHER_FALLBACK_MESSAGE: &str =
    "The query could not be understood. Please provide a city and a date.";

/// Fallback follow-up when ticket SQL generation cannot be parsed.
pub const TICKET_FALLBACK_MESSAGE: &str =
    "Could not determine the query type or SQL. Please provide more specific details.";

/// Outcome of weather SQL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlGeneration {
    /// A bare SELECT to run against the tool server.
    Sql(String),
    /// A clarifying question for the user.
    InputRequired(String),
}

/// Ticket table targeted by a generated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    Train,
    Flight,
    Concert,
}

impl TicketKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "train" => Some(Self::Train),
            "flight" => Some(Self::Flight),
            "concert" => Some(Self::Concert),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Flight => "flight",
            Self::Concert => "concert",
        }
    }
}

/// Outcome of ticket SQL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketSqlGeneration {
    Query { kind: TicketKind, sql: String },
    InputRequired(String),
}

/// One step of the order agent's tool loop.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderDirective {
    /// Invoke a booking tool.
    ToolCall { tool: String, arguments: Value },
    /// Ask the user for a missing parameter.
    InputRequired(String),
    /// Final plain-text answer.
    Final(String),
}

/// Strip a surrounding markdown code fence (```json ... ```), if present.
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let body = match trimmed.find('\n') {
        Some(i) => &trimmed[i + 1..],
        None => return String::new(),
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Parse the weather generator's output.
///
/// A `{`-prefixed body is an input-required JSON; anything else is taken
/// as SQL. Malformed JSON degrades to the fallback follow-up.
pub fn parse_weather_output(raw: &str) -> SqlGeneration {
    let trimmed = raw.trim();
    if !trimmed.starts_with('{') {
        return SqlGeneration::Sql(trimmed.to_string());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if value.get("status").and_then(Value::as_str) == Some("input_required") => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(WEATHER_FALLBACK_MESSAGE);
            SqlGeneration::InputRequired(message.to_string())
        }
        _ => SqlGeneration::InputRequired(WEATHER_FALLBACK_MESSAGE.to_string()),
    }
}

/// Parse the ticket generator's output.
///
/// Expected shapes: a `{"type": ...}` line followed by the SQL (optionally
/// wrapped in a ```json fence), or a single input-required JSON line.
/// Everything else degrades to the fallback follow-up.
pub fn parse_ticket_output(raw: &str) -> TicketSqlGeneration {
    let mut lines = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("```"));

    let first = match lines.next() {
        Some(line) => line,
        None => return TicketSqlGeneration::InputRequired(TICKET_FALLBACK_MESSAGE.to_string()),
    };

    if first.starts_with(r#"{"type":"#) {
        let kind = serde_json::from_str::<Value>(first)
            .ok()
            .and_then(|v| {
                v.get("type")
                    .and_then(Value::as_str)
                    .and_then(TicketKind::from_label)
            });
        let sql = lines.collect::<Vec<_>>().join(" ");
        return match kind {
            Some(kind) if !sql.is_empty() => TicketSqlGeneration::Query { kind, sql },
            _ => TicketSqlGeneration::InputRequired(TICKET_FALLBACK_MESSAGE.to_string()),
        };
    }

    if first.starts_with(r#"{"status":"#) {
        if let Ok(value) = serde_json::from_str::<Value>(first) {
            if value.get("status").and_then(Value::as_str) == Some("input_required") {
                let message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(TICKET_FALLBACK_MESSAGE);
                return TicketSqlGeneration::InputRequired(message.to_string());
            }
        }
    }

    TicketSqlGeneration::InputRequired(TICKET_FALLBACK_MESSAGE.to_string())
}

/// Parse one turn of the order agent's tool loop.
pub fn parse_order_output(raw: &str) -> OrderDirective {
    let stripped = strip_code_fence(raw);
    let trimmed = stripped.trim();

    if trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            if let Some(tool) = value.get("tool").and_then(Value::as_str) {
                let arguments = value
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Default::default()));
                return OrderDirective::ToolCall {
                    tool: tool.to_string(),
                    arguments,
                };
            }
            if value.get("status").and_then(Value::as_str) == Some("input_required") {
                let message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Please provide the missing booking details.");
                return OrderDirective::InputRequired(message.to_string());
            }
        }
    }

    OrderDirective::Final(trimmed.to_string())
}
