//! Weather lookup tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use wayfarer_common::{Result, WayfarerError};

use crate::db::Database;
use crate::registry::Tool;

const NO_DATA_MESSAGE: &str = "No weather data found. Please check the city and date.";

#[derive(Deserialize)]
struct SqlArguments {
    sql: String,
}

/// `query_weather`: run a SELECT against `weather_data` and return the
/// result envelope.
pub struct QueryWeatherTool {
    db: Arc<Database>,
}

impl QueryWeatherTool {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for QueryWeatherTool {
    fn name(&self) -> &str {
        "query_weather"
    }

    fn description(&self) -> &str {
        "Query weather data with SQL, e.g. \
         'SELECT * FROM weather_data WHERE city = \"Shanghai\" AND fx_date = \"2025-12-24\"'"
    }

    async fn call(&self, arguments: Value) -> Result<Value> {
        let args: SqlArguments = serde_json::from_value(arguments)
            .map_err(|e| WayfarerError::Tool(format!("query_weather needs a sql argument: {e}")))?;

        info!(sql = %args.sql, "Executing weather query");
        let outcome = self.db.query_envelope(&args.sql, NO_DATA_MESSAGE);
        Ok(serde_json::to_value(outcome)?)
    }
}
