//! Booking stub tools.
//!
//! There is no real booking backend; each tool validates its arguments,
//! logs the order and returns a confirmation string.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use wayfarer_common::{Result, WayfarerError};

use crate::registry::Tool;

#[derive(Debug, Deserialize)]
struct TrainOrder {
    departure_date: String,
    train_number: String,
    seat_type: String,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct FlightOrder {
    departure_date: String,
    flight_number: String,
    seat_type: String,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct ConcertOrder {
    start_date: String,
    artist: String,
    venue: String,
    seat_type: String,
    count: u32,
}

pub struct OrderTrainTool;

#[async_trait]
impl Tool for OrderTrainTool {
    fn name(&self) -> &str {
        "order_train"
    }

    fn description(&self) -> &str {
        "Book train tickets. Arguments: departure_date (e.g. '2025-10-30'), \
         train_number (e.g. 'G346'), seat_type (e.g. 'second class'), count"
    }

    async fn call(&self, arguments: Value) -> Result<Value> {
        let order: TrainOrder = serde_json::from_value(arguments)
            .map_err(|e| WayfarerError::Tool(format!("invalid order_train arguments: {e}")))?;

        info!(
            departure_date = %order.departure_date,
            train_number = %order.train_number,
            seat_type = %order.seat_type,
            count = order.count,
            "Booking train tickets"
        );
        Ok(Value::String(format!(
            "Success! Booked {} x {} ticket(s) on train {} departing {}.",
            order.count, order.seat_type, order.train_number, order.departure_date
        )))
    }
}

pub struct OrderFlightTool;

#[async_trait]
impl Tool for OrderFlightTool {
    fn name(&self) -> &str {
        "order_flight"
    }

    fn description(&self) -> &str {
        "Book flight tickets. Arguments: departure_date (e.g. '2025-10-30'), \
         flight_number (e.g. 'CA6557'), seat_type (e.g. 'economy'), count"
    }

    async fn call(&self, arguments: Value) -> Result<Value> {
        let order: FlightOrder = serde_json::from_value(arguments)
            .map_err(|e| WayfarerError::Tool(format!("invalid order_flight arguments: {e}")))?;

        info!(
            departure_date = %order.departure_date,
            flight_number = %order.flight_number,
            seat_type = %order.seat_type,
            count = order.count,
            "Booking flight tickets"
        );
        Ok(Value::String(format!(
            "Success! Booked {} x {} ticket(s) on flight {} departing {}.",
            order.count, order.seat_type, order.flight_number, order.departure_date
        )))
    }
}

pub struct OrderConcertTool;

#[async_trait]
impl Tool for OrderConcertTool {
    fn name(&self) -> &str {
        "order_concert"
    }

    fn description(&self) -> &str {
        "Book concert tickets. Arguments: start_date (e.g. '2025-10-30'), \
         artist, venue, seat_type (e.g. 'stand'), count"
    }

    async fn call(&self, arguments: Value) -> Result<Value> {
        let order: ConcertOrder = serde_json::from_value(arguments)
            .map_err(|e| WayfarerError::Tool(format!("invalid order_concert arguments: {e}")))?;

        info!(
            start_date = %order.start_date,
            artist = %order.artist,
            venue = %order.venue,
            seat_type = %order.seat_type,
            count = order.count,
            "Booking concert tickets"
        );
        Ok(Value::String(format!(
            "Success! Booked {} x {} ticket(s) for {} at {} on {}.",
            order.count, order.seat_type, order.artist, order.venue, order.start_date
        )))
    }
}
