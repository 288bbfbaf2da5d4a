//! Ticket lookup tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use wayfarer_common::{Result, WayfarerError};

use crate::db::Database;
use crate::registry::Tool;

const NO_DATA_MESSAGE: &str = "No ticket data found. Please check the query conditions.";

#[derive(Deserialize)]
struct SqlArguments {
    sql: String,
}

/// `query_tickets`: run a SELECT against the train / flight / concert
/// ticket tables and return the result envelope.
pub struct QueryTicketsTool {
    db: Arc<Database>,
}

impl QueryTicketsTool {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for QueryTicketsTool {
    fn name(&self) -> &str {
        "query_tickets"
    }

    fn description(&self) -> &str {
        "Query ticket data with SQL, e.g. \
         'SELECT * FROM train_tickets WHERE departure_city = \"Beijing\" AND arrival_city = \"Shanghai\"'"
    }

    async fn call(&self, arguments: Value) -> Result<Value> {
        let args: SqlArguments = serde_json::from_value(arguments)
            .map_err(|e| WayfarerError::Tool(format!("query_tickets needs a sql argument: {e}")))?;

        info!(sql = %args.sql, "Executing ticket query");
        let outcome = self.db.query_envelope(&args.sql, NO_DATA_MESSAGE);
        Ok(serde_json::to_value(outcome)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TrainTicket;
    use serde_json::json;

    #[tokio::test]
    async fn query_tickets_returns_envelope() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.insert_train_ticket(&TrainTicket {
            departure_city: "Beijing".into(),
            arrival_city: "Shanghai".into(),
            departure_time: "2025-08-12 07:00:00".into(),
            arrival_time: "2025-08-12 11:30:00".into(),
            train_number: "G1001".into(),
            seat_type: "second class".into(),
            total_seats: 1000,
            remaining_seats: 50,
            price: 553.5,
        })
        .unwrap();

        let tool = QueryTicketsTool::new(db);
        let content = tool
            .call(json!({
                "sql": "SELECT train_number, remaining_seats FROM train_tickets \
                        WHERE departure_city = 'Beijing' AND arrival_city = 'Shanghai'"
            }))
            .await
            .unwrap();

        assert_eq!(content["status"], "success");
        assert_eq!(content["data"][0]["train_number"], "G1001");
        assert_eq!(content["data"][0]["remaining_seats"], 50);
    }

    #[tokio::test]
    async fn write_statements_come_back_as_error_envelope() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let tool = QueryTicketsTool::new(db);

        let content = tool
            .call(json!({"sql": "UPDATE train_tickets SET remaining_seats = 0"}))
            .await
            .unwrap();

        assert_eq!(content["status"], "error");
    }
}
