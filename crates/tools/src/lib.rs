//! Tool servers for Wayfarer.
//!
//! Each tool server is a small HTTP process exposing a set of named tools:
//!
//! - **TicketTools** (port 8001): `query_tickets` - SQL lookup over the
//!   three ticket tables
//! - **WeatherTools** (port 8002): `query_weather` - SQL lookup over
//!   `weather_data`, plus the daily forecast feed
//! - **OrderTools** (port 8003): `order_train` / `order_flight` /
//!   `order_concert` booking stubs
//!
//! ```text
//! Agent server
//!      │  POST /tools/call {"tool": ..., "arguments": {...}}
//!      ▼
//! ┌─────────────┐      ┌──────────────┐
//! │ ToolServer  │─────▶│ ToolRegistry │
//! └─────────────┘      └──────┬───────┘
//!                             │
//!                      ┌──────▼───────┐
//!                      │   SQLite     │
//!                      └──────────────┘
//! ```

pub mod booking;
pub mod client;
pub mod db;
pub mod feed;
pub mod registry;
pub mod server;
pub mod ticket;
pub mod weather;

pub use client::ToolClient;
pub use db::{ConcertTicket, Database, FlightTicket, TrainTicket, WeatherDay};
pub use feed::{FeedConfig, WeatherFeed};
pub use registry::{Tool, ToolDescriptor, ToolRegistry};
pub use server::{create_router, serve, ToolServer};
