//! HTTP API for the budget agent.
//!
//! ## Endpoints
//!
//! - `POST /a2a/agent/{agentId}` - A2A JSON-RPC task exchange
//! - `GET /api/health` - Health check

mod a2a;
mod routes;
mod types;

pub use routes::{serve, AppState};
pub use types::*;
