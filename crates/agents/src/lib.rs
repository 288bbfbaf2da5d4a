//! Agent servers for Wayfarer.
//!
//! Each agent wraps one LLM-backed responsibility behind the agent
//! protocol:
//!
//! - **WeatherQueryAssistant** (port 5005): natural language → SQL over
//!   `weather_data`, executed via the weather tool server
//! - **TicketQueryAssistant** (port 5006): natural language → typed SQL
//!   over the ticket tables, executed via the ticket tool server
//! - **TicketOrderAssistant** (port 5007): checks availability through
//!   the ticket agent, then books through the order tool server
//!
//! ```text
//! Coordinator
//!     │ POST /tasks
//!     ▼
//! ┌─────────────────┐   LLM    ┌──────────────┐
//! │  Agent server   │─────────▶│  SQL / tool  │
//! │  (this crate)   │          │   call text  │
//! └────────┬────────┘          └──────────────┘
//!          │ POST /tools/call
//!          ▼
//!    Tool server (wayfarer-tools)
//! ```

pub mod client;
pub mod order;
pub mod prompts;
pub mod server;
pub mod sqlgen;
pub mod ticket;
pub mod weather;

pub use client::AgentClient;
pub use order::OrderAgent;
pub use server::{create_agent_router, serve_agent};
pub use sqlgen::{OrderDirective, SqlGeneration, TicketKind, TicketSqlGeneration};
pub use ticket::TicketAgent;
pub use weather::WeatherAgent;
