//! API request and response types.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Configured LLM model
    pub model: String,

    /// Registered agent ids
    pub agents: Vec<String>,

    /// Tool names available across the registered agents
    pub tools: Vec<String>,
}
